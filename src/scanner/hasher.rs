//! XXH3-64 file content hasher.
//!
//! # Overview
//!
//! Computes a deterministic 64-bit content hash of a file's raw bytes using
//! XXH3: fast, well-distributed, and stable across platforms and
//! invocations, which is what makes the output usable as a cache key.
//! It is not cryptographic and offers no collision resistance against
//! adversarial input.
//!
//! The file is read in full before hashing; byte-identical content always
//! produces the identical value regardless of path or platform.

use std::fs;
use std::path::Path;

use xxhash_rust::xxh3;

use crate::error::ReadFailure;

/// Stateless content hasher.
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash raw bytes.
    #[must_use]
    pub fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        xxh3::xxh3_64(bytes)
    }

    /// Read `path` in full and hash its content.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadFailure`] if the file cannot be opened or read
    /// (permission denied, removed between enumeration and read, ...).
    pub fn hash_file(&self, path: &Path) -> Result<u64, ReadFailure> {
        let contents = fs::read(path).map_err(|source| ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.hash_bytes(&contents))
    }
}
