//! Node/edge views consumed by graph renderers.
//!
//! # Responsibility
//! - Convert a forest plus collapse state into visible nodes and edges.
//! - Compute a deterministic top-down layout with subtree-aware spacing.
//!
//! # Invariants
//! - No node or edge is emitted below a collapsed node.
//! - Output is a pure function of its inputs; identical inputs give identical output.

pub mod layout;
pub mod visible;
