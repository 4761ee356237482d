//! Glob pattern compilation and include/exclude matching.
//!
//! # Overview
//!
//! A pattern list is split into include patterns and exclude patterns (a
//! leading `!` marks an exclude). A candidate path is selected iff it matches
//! at least one include pattern (or the include set is empty, meaning "match
//! everything") and matches no exclude pattern. The two sets are compiled
//! independently and evaluated in fixed order, so excludes always win
//! regardless of where they appear in the caller's list.
//!
//! Matching operates on the candidate's relative path string, directory
//! components included, with forward-slash separators. `*` never crosses a
//! separator; `**` crosses zero or more path segments; `[...]` character
//! classes are supported; matching is case-sensitive. Leading dots are
//! matched by `*` like any other character; there is no implicit dotfile
//! exclusion.
//!
//! # Example
//!
//! ```
//! use globhash::PatternSet;
//!
//! let patterns = ["src/**/*.rs".to_string(), "!src/generated/**".to_string()];
//! let set = PatternSet::compile(&patterns).unwrap();
//!
//! assert!(set.is_match("src/lib.rs"));
//! assert!(set.is_match("src/scanner/walker.rs"));
//! assert!(!set.is_match("src/generated/bindings.rs"));
//! assert!(!set.is_match("README.md"));
//! ```

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::GlobHashError;

/// Marker prefix turning a pattern into an exclude pattern.
const NEGATION_MARKER: char = '!';

/// Compiled include/exclude matchers for one invocation.
///
/// Compilation is pure; the set is immutable once built and safe to share
/// across worker threads.
#[derive(Debug)]
pub struct PatternSet {
    includes: GlobSet,
    /// An empty include list selects every candidate.
    includes_empty: bool,
    excludes: GlobSet,
}

impl PatternSet {
    /// Compile an ordered list of raw glob strings.
    ///
    /// Patterns beginning with `!` go into the exclude set (with the marker
    /// stripped); all others into the include set.
    ///
    /// # Errors
    ///
    /// Returns [`GlobHashError::InvalidPattern`] naming the offending raw
    /// string if any pattern fails to compile.
    pub fn compile(patterns: &[String]) -> Result<Self, GlobHashError> {
        let mut include_builder = GlobSetBuilder::new();
        let mut exclude_builder = GlobSetBuilder::new();
        let mut include_count = 0usize;
        let mut exclude_count = 0usize;

        for raw in patterns {
            match raw.strip_prefix(NEGATION_MARKER) {
                Some(stripped) => {
                    exclude_builder.add(build_glob(stripped, raw)?);
                    exclude_count += 1;
                }
                None => {
                    include_builder.add(build_glob(raw, raw)?);
                    include_count += 1;
                }
            }
        }

        let includes = include_builder
            .build()
            .map_err(|source| invalid_pattern(patterns, source))?;
        let excludes = exclude_builder
            .build()
            .map_err(|source| invalid_pattern(patterns, source))?;

        log::debug!(
            "compiled {} include and {} exclude pattern(s)",
            include_count,
            exclude_count
        );

        Ok(Self {
            includes,
            includes_empty: include_count == 0,
            excludes,
        })
    }

    /// Whether the relative path `rel_path` (forward-slash separated) is
    /// selected by this pattern set.
    #[must_use]
    pub fn is_match(&self, rel_path: &str) -> bool {
        if !self.includes_empty && !self.includes.is_match(rel_path) {
            return false;
        }
        !self.excludes.is_match(rel_path)
    }
}

/// Compile one glob with path-aware `*` semantics.
///
/// `raw` is the caller's original string (marker included) so errors name
/// what the caller actually wrote.
fn build_glob(pattern: &str, raw: &str) -> Result<globset::Glob, GlobHashError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| GlobHashError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })
}

/// Set-level build failures do not name a specific glob; fall back to the
/// full pattern list.
fn invalid_pattern(patterns: &[String], source: globset::Error) -> GlobHashError {
    GlobHashError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    }
}
