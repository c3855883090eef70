//! Recursive watch registration.
//!
//! Walks a directory tree and registers every directory with the
//! backend. The set of registered directories lives here rather than
//! being implied by the backend, and only ever grows.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::is_hidden;
use crate::error::{Result, WatchError};
use crate::watcher::WatchBackend;

/// Owns the backend and the watch set.
///
/// The watch set is bookkeeping only: the backend is asked again for
/// every directory a walk reaches, so a directory that was deleted and
/// recreated under the same name gets a fresh kernel watch.
pub struct WatchRegistrar<B> {
    backend: B,
    watched: HashSet<PathBuf>,
    ignore_hidden: bool,
}

impl<B: WatchBackend> WatchRegistrar<B> {
    /// Creates a registrar with an empty watch set.
    pub fn new(backend: B, ignore_hidden: bool) -> Self {
        Self {
            backend,
            watched: HashSet::new(),
            ignore_hidden,
        }
    }

    /// Registers `dir` and every directory beneath it.
    ///
    /// Hidden entries below `dir` are pruned together with their subtree
    /// when hidden filtering is on; `dir` itself is always walked.
    /// Returns how many directories were not in the watch set before.
    /// The first walk or registration failure stops the traversal and
    /// is returned.
    pub fn register_tree(&mut self, dir: &Path) -> Result<usize> {
        let ignore_hidden = self.ignore_hidden;
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !(ignore_hidden && entry.depth() > 0 && is_hidden(entry.path())));

        let mut added = 0;
        for entry in walker {
            let entry = entry.map_err(|source| WatchError::Walk {
                path: source.path().unwrap_or(dir).to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            if self.register(entry.path())? {
                added += 1;
            }
        }

        Ok(added)
    }

    /// Registers a single directory. Returns false if it was seen before.
    fn register(&mut self, dir: &Path) -> Result<bool> {
        self.backend
            .watch(dir)
            .map_err(|source| WatchError::register(dir, source))?;

        if !self.watched.insert(dir.to_path_buf()) {
            debug!("Re-registered: {}", dir.display());
            return Ok(false);
        }
        info!("Watching: {}", dir.display());

        Ok(true)
    }

    /// Whether `dir` has ever been registered.
    pub fn is_watched(&self, dir: &Path) -> bool {
        self.watched.contains(dir)
    }

    /// All registered directories, in no particular order.
    pub fn watched(&self) -> impl Iterator<Item = &Path> {
        self.watched.iter().map(PathBuf::as_path)
    }

    /// Number of registered directories.
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// The backend directories are registered with.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
