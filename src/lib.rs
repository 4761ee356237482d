//! globhash - Deterministic glob-matched file content hashing
//!
//! Computes a per-file XXH3-64 content hash for the set of files selected by
//! a list of glob patterns (with `!`-negation) rooted at a working
//! directory, serially or with bounded parallelism. For a fixed directory
//! snapshot and pattern list the result map is identical in both modes,
//! which makes it usable for cache-key derivation in build and
//! dependency-tracking tools.
//!
//! ```no_run
//! use globhash::{hash_parallel, Options};
//!
//! let patterns = vec!["src/**/*.rs".to_string(), "!**/target/**".to_string()];
//! let options = Options::new(".").with_concurrency(8);
//! let hashes = hash_parallel(&patterns, &options)?;
//! for (path, value) in &hashes {
//!     println!("{path}: {value:016x}");
//! }
//! # Ok::<(), globhash::GlobHashError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod scanner;

pub use config::{Options, DEFAULT_CONCURRENCY};
pub use engine::{glob, hash, hash_parallel};
pub use error::{GlobHashError, ReadFailure};
pub use pattern::PatternSet;
pub use scanner::{Candidate, Hasher, Walker};
