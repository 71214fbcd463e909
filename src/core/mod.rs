//! Core data types and structures
//!
//! This module contains the fundamental data types used throughout
//! modgraph, separated from the logic that builds and renders them.

pub mod path;
pub mod types;

pub use path::{normalize_id, segments, short_name, validate_module_path};
pub use types::*;
