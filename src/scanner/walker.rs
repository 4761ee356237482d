//! Directory walker producing candidate relative paths.
//!
//! # Overview
//!
//! The [`Walker`] recurses into every subdirectory under its root, dotfiles
//! and dot-directories included, and yields each regular file as a
//! [`Candidate`]: the absolute path plus the path relative to the root with
//! forward-slash separators. Directories are traversed but never yielded.
//! Symlinks that resolve to regular files are yielded; broken symlinks and
//! symlinks to directories are skipped (symlinked directories are not
//! followed, which keeps the walk cycle-free).
//!
//! Every call to [`Walker::walk`] gets an independent traversal; the walker
//! holds no state across walks.
//!
//! # Errors
//!
//! A missing or unreadable root fails up front with
//! [`GlobHashError::Enumeration`]. A traversal failure deeper in the tree
//! (e.g. an unreadable subdirectory) is yielded as an error item and the
//! engine aborts the call. Consistent with the abort-on-failure hashing
//! policy, the engine never returns a silently incomplete map.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::GlobHashError;

/// One selectable file found during traversal.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Absolute (root-joined) path, used for reading the file.
    pub path: PathBuf,
    /// Path relative to the walk root, forward-slash separated. This is the
    /// string patterns match against and the key in the result map.
    pub rel_path: String,
}

/// Recursive enumerator of regular files under a root directory.
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    /// Create a walker rooted at `root`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Validate the root and return a lazy candidate stream.
    ///
    /// # Errors
    ///
    /// Returns [`GlobHashError::Enumeration`] if the root does not exist or
    /// is not a directory. Failures during traversal surface as `Err` items
    /// in the stream.
    pub fn walk(
        &self,
    ) -> Result<impl Iterator<Item = Result<Candidate, GlobHashError>> + '_, GlobHashError> {
        let metadata = fs::metadata(&self.root).map_err(|source| GlobHashError::Enumeration {
            path: self.root.clone(),
            source,
        })?;

        if !metadata.is_dir() {
            return Err(GlobHashError::Enumeration {
                path: self.root.clone(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }

        let root = self.root.clone();
        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => candidate_from_entry(&root, entry).transpose(),
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("walk error"));
                    Some(Err(GlobHashError::Enumeration { path, source }))
                }
            });

        Ok(entries)
    }
}

/// Turn a walk entry into a candidate, or `None` for non-files.
fn candidate_from_entry(
    root: &Path,
    entry: walkdir::DirEntry,
) -> Result<Option<Candidate>, GlobHashError> {
    let file_type = entry.file_type();

    let is_regular_file = if file_type.is_file() {
        true
    } else if file_type.is_symlink() {
        // fs::metadata follows the link; a broken symlink is not a file.
        fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false)
    } else {
        return Ok(None);
    };

    if !is_regular_file {
        return Ok(None);
    }

    let rel = entry.path().strip_prefix(root).map_err(|_| {
        // strip_prefix cannot fail for entries yielded under root; treat it
        // as an enumeration failure rather than panicking.
        GlobHashError::Enumeration {
            path: entry.path().to_path_buf(),
            source: io::Error::other("entry outside walk root"),
        }
    })?;

    let rel_path = rel.to_string_lossy().replace('\\', "/");
    log::trace!("candidate: {rel_path}");

    Ok(Some(Candidate {
        path: entry.into_path(),
        rel_path,
    }))
}
