//! Directory traversal and file content hashing.
//!
//! Submodules:
//! - [`walker`]: recursive enumeration of regular files as relative paths
//! - [`hasher`]: XXH3-64 content hashing

pub mod hasher;
pub mod walker;

pub use hasher::Hasher;
pub use walker::{Candidate, Walker};
