//! Interaction state layered over the canonical forest.
//!
//! # Responsibility
//! - Track which nodes are collapsed in the graph view.
//! - Propagate completion edits through the canonical forest.

pub mod collapse;
pub mod progress;
