//! Error types for glob compilation, enumeration, and hashing.
//!
//! Every failure mode is a distinct variant carrying the path(s) involved,
//! so callers can distinguish a bad pattern from a missing directory from an
//! unreadable file without string matching.

use std::fmt;
use std::path::PathBuf;

/// A single file that could not be read during hashing.
#[derive(Debug)]
pub struct ReadFailure {
    /// Path of the file that failed, relative to the working directory.
    pub path: PathBuf,
    /// The underlying I/O error.
    pub source: std::io::Error,
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

/// Errors surfaced by [`hash`](crate::hash), [`hash_parallel`](crate::hash_parallel)
/// and [`glob`](crate::glob).
///
/// Pattern and option validation errors are returned before any file I/O
/// begins. A failed call never returns a partial result map.
#[derive(thiserror::Error, Debug)]
pub enum GlobHashError {
    /// A glob pattern could not be compiled (malformed syntax, e.g. an
    /// unbalanced bracket expression).
    #[error("invalid glob pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The raw pattern string as supplied by the caller.
        pattern: String,
        /// The underlying compilation error.
        #[source]
        source: globset::Error,
    },

    /// The `concurrency` option is not a positive integer, or a worker pool
    /// of the requested size could not be constructed (thread spawning
    /// failed at the OS level).
    #[error("invalid concurrency {concurrency}: must be a positive integer")]
    Configuration {
        /// The rejected or unsatisfiable value.
        concurrency: usize,
    },

    /// The working directory is missing or unreadable, or traversal of a
    /// subdirectory failed.
    #[error("cannot enumerate {path}: {source}")]
    Enumeration {
        /// Path where enumeration failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// One or more selected files could not be read during hashing.
    ///
    /// All failing paths encountered in the run are aggregated; no partial
    /// map is returned.
    #[error("failed to read {} file(s): {}", .failures.len(), format_failures(.failures))]
    Read {
        /// Every file that failed, with its underlying error.
        failures: Vec<ReadFailure>,
    },
}

fn format_failures(failures: &[ReadFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
