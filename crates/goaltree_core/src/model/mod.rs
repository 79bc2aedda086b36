//! Goal tree domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by every tree transformation.
//! - Keep one record shape for tree rows, flat rows and graph nodes.
//!
//! # Invariants
//! - Every node is identified by a stable `NodeId`, unique per forest.
//! - The model is a forest: an ordered sequence of roots with no sharing or cycles.

pub mod goal;
