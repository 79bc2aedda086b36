//! FFI surface for the goal tree UI shell.

pub mod api;
