//! Invocation options and their validation.

use std::path::{Path, PathBuf};

use crate::error::GlobHashError;

/// Worker-pool size used when the caller does not set one.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Options for a single hashing invocation.
///
/// Immutable once the call begins; the engine owns the options for the
/// duration of one invocation.
///
/// # Example
///
/// ```
/// use globhash::Options;
///
/// let options = Options::new("/tmp/project").with_concurrency(8);
/// assert_eq!(options.concurrency, Some(8));
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Base directory for both pattern matching and the relative-path keys
    /// in the result map.
    pub cwd: PathBuf,

    /// Upper bound on simultaneous open-file/hash operations in the
    /// parallel entry point. `None` means [`DEFAULT_CONCURRENCY`]. Accepted
    /// but unused by the serial entry point.
    pub concurrency: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            concurrency: None,
        }
    }
}

impl Options {
    /// Create options rooted at the given working directory.
    #[must_use]
    pub fn new<P: AsRef<Path>>(cwd: P) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            concurrency: None,
        }
    }

    /// Set the worker-pool bound for the parallel entry point.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Resolve the effective worker count, rejecting zero.
    ///
    /// Validated by both entry points for API symmetry, even though the
    /// serial path never spawns workers.
    pub fn effective_concurrency(&self) -> Result<usize, GlobHashError> {
        match self.concurrency {
            Some(0) => Err(GlobHashError::Configuration { concurrency: 0 }),
            Some(n) => Ok(n),
            None => Ok(DEFAULT_CONCURRENCY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.cwd, PathBuf::from("."));
        assert!(options.concurrency.is_none());
        assert_eq!(options.effective_concurrency().unwrap(), DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_explicit_concurrency() {
        let options = Options::new(".").with_concurrency(16);
        assert_eq!(options.effective_concurrency().unwrap(), 16);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let options = Options::new(".").with_concurrency(0);
        let err = options.effective_concurrency().unwrap_err();
        assert!(matches!(
            err,
            GlobHashError::Configuration { concurrency: 0 }
        ));
    }
}
