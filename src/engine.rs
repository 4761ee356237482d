//! Selection and hashing orchestration.
//!
//! # Overview
//!
//! The engine ties the pieces together: compile the pattern list, enumerate
//! candidates under `cwd`, keep the candidates the pattern set selects, then
//! hash each selected file, either one at a time ([`hash`]) or on a
//! dedicated rayon pool bounded by the `concurrency` option
//! ([`hash_parallel`]).
//!
//! Both modes produce the same map for the same tree and pattern list:
//! workers compute independent `(path, hash)` pairs that are merged into one
//! map after all workers finish, so execution order never shows in the
//! output.
//!
//! # Error policy
//!
//! Conservative abort-on-failure: if any selected file cannot be read, the
//! whole call fails with an aggregated error listing every failed path, and
//! no partial map is returned. Serial mode keeps hashing the remaining files
//! after a failure so its aggregate lists the same paths parallel mode
//! would.

use std::collections::HashMap;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::config::Options;
use crate::error::{GlobHashError, ReadFailure};
use crate::pattern::PatternSet;
use crate::scanner::{Candidate, Hasher, Walker};

/// Hash every selected file serially.
///
/// `options.concurrency` is validated for API symmetry but does not change
/// behavior here.
///
/// # Errors
///
/// See [`GlobHashError`]; pattern and option validation happens before any
/// file I/O.
pub fn hash(
    patterns: &[String],
    options: &Options,
) -> Result<HashMap<String, u64>, GlobHashError> {
    options.effective_concurrency()?;
    let selected = select(patterns, options)?;

    log::debug!("hashing {} file(s) serially", selected.len());

    let hasher = Hasher::new();
    let results: Vec<Result<(String, u64), ReadFailure>> = selected
        .into_iter()
        .map(|candidate| hash_candidate(&hasher, candidate))
        .collect();

    assemble(results)
}

/// Hash every selected file on a worker pool of `options.concurrency`
/// threads (default 4).
///
/// Each worker hashes one file end-to-end before taking the next, so the
/// bound caps simultaneous open file handles. A bound larger than the number
/// of selected files simply leaves workers idle.
///
/// # Errors
///
/// See [`GlobHashError`]; identical policy to [`hash`]. A pool-construction
/// failure (the OS refusing to spawn the requested workers) surfaces as
/// [`GlobHashError::Configuration`] carrying the requested bound; the
/// underlying cause is logged.
pub fn hash_parallel(
    patterns: &[String],
    options: &Options,
) -> Result<HashMap<String, u64>, GlobHashError> {
    let concurrency = options.effective_concurrency()?;
    let selected = select(patterns, options)?;

    log::debug!(
        "hashing {} file(s) on {} worker(s)",
        selected.len(),
        concurrency
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .build()
        .map_err(|e| {
            log::warn!("failed to build worker pool: {e}");
            GlobHashError::Configuration { concurrency }
        })?;

    let hasher = Hasher::new();
    let results: Vec<Result<(String, u64), ReadFailure>> = pool.install(|| {
        selected
            .into_par_iter()
            .map(|candidate| hash_candidate(&hasher, candidate))
            .collect()
    });

    assemble(results)
}

/// Enumerate and match without hashing, returning the sorted relative paths
/// the hashing entry points would use as keys.
///
/// # Errors
///
/// [`GlobHashError::InvalidPattern`] or [`GlobHashError::Enumeration`], as
/// for the hashing entry points.
pub fn glob(patterns: &[String], options: &Options) -> Result<Vec<String>, GlobHashError> {
    let mut paths: Vec<String> = select(patterns, options)?
        .into_iter()
        .map(|candidate| candidate.rel_path)
        .collect();
    paths.sort_unstable();
    Ok(paths)
}

/// Compile patterns and collect the matching candidates under `cwd`.
fn select(patterns: &[String], options: &Options) -> Result<Vec<Candidate>, GlobHashError> {
    let pattern_set = PatternSet::compile(patterns)?;
    let walker = Walker::new(&options.cwd);

    let mut selected = Vec::new();
    for candidate in walker.walk()? {
        let candidate = candidate?;
        if pattern_set.is_match(&candidate.rel_path) {
            selected.push(candidate);
        }
    }

    log::debug!(
        "selected {} file(s) under {}",
        selected.len(),
        options.cwd.display()
    );

    Ok(selected)
}

/// Hash one candidate, keying both success and failure by the relative path.
fn hash_candidate(
    hasher: &Hasher,
    candidate: Candidate,
) -> Result<(String, u64), ReadFailure> {
    match hasher.hash_file(&candidate.path) {
        Ok(value) => Ok((candidate.rel_path, value)),
        Err(failure) => {
            log::warn!("failed to read {}: {}", candidate.rel_path, failure.source);
            Err(ReadFailure {
                path: PathBuf::from(candidate.rel_path),
                source: failure.source,
            })
        }
    }
}

/// Merge worker results into the final map, or aggregate every failure.
fn assemble(
    results: Vec<Result<(String, u64), ReadFailure>>,
) -> Result<HashMap<String, u64>, GlobHashError> {
    let mut hashes = HashMap::with_capacity(results.len());
    let mut failures = Vec::new();

    for result in results {
        match result {
            Ok((rel_path, value)) => {
                hashes.insert(rel_path, value);
            }
            Err(failure) => failures.push(failure),
        }
    }

    if failures.is_empty() {
        Ok(hashes)
    } else {
        // Completion order differs between runs; sort so the error message
        // is stable.
        failures.sort_by(|a, b| a.path.cmp(&b.path));
        Err(GlobHashError::Read { failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &std::path::Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.txt", "alpha");
        write(dir.path(), "sub/b.txt", "beta");
        write(dir.path(), ".hidden", "dot");

        let options = Options::new(dir.path());
        let serial = hash(&[], &options).unwrap();
        let parallel = hash_parallel(&[], &options).unwrap();

        assert_eq!(serial, parallel);
        assert_eq!(serial.len(), 3);
    }

    #[test]
    fn test_glob_matches_hash_keys() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", "{}");
        write(dir.path(), "b.txt", "b");

        let options = Options::new(dir.path());
        let map = hash(&[], &options).unwrap();
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        let paths = glob(&[], &options).unwrap();
        let path_refs: Vec<&String> = paths.iter().collect();
        assert_eq!(keys, path_refs);
    }

    #[test]
    fn test_unreadable_file_fails_whole_call() {
        let dir = tempdir().unwrap();
        write(dir.path(), "good.txt", "ok");
        write(dir.path(), "bad.txt", "broken");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(
                dir.path().join("bad.txt"),
                fs::Permissions::from_mode(0o000),
            )
            .unwrap();

            // Root ignores permission bits; nothing to verify in that case.
            if fs::read(dir.path().join("bad.txt")).is_ok() {
                return;
            }

            let options = Options::new(dir.path());
            let err = hash(&[], &options).unwrap_err();
            match err {
                GlobHashError::Read { failures } => {
                    assert_eq!(failures.len(), 1);
                    assert_eq!(failures[0].path, PathBuf::from("bad.txt"));
                }
                other => panic!("expected Read, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_concurrency_rejected_before_io() {
        // cwd does not exist: the Configuration error must win because
        // validation happens before enumeration.
        let options = Options::new("/nonexistent-globhash-test").with_concurrency(0);
        assert!(matches!(
            hash_parallel(&[], &options),
            Err(GlobHashError::Configuration { concurrency: 0 })
        ));
        assert!(matches!(
            hash(&[], &options),
            Err(GlobHashError::Configuration { concurrency: 0 })
        ));
    }
}
