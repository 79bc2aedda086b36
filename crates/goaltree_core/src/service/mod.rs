//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure tree transformations into user-level commands.
//! - Keep FFI and CLI layers decoupled from traversal details.

pub mod goal_session;
