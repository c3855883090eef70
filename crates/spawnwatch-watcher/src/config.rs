//! Runtime configuration.
//!
//! Built once from the command line and never mutated afterwards.

use crate::error::{Result, WatchError};
use std::path::{Path, PathBuf};

/// Everything the watcher needs to know about what to watch and what to run.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Root of the tree to watch.
    pub root: PathBuf,

    /// Program to invoke for every new path.
    pub command: String,

    /// Leading arguments passed before the new path.
    pub args: Vec<String>,

    /// Also run the command when a new directory appears.
    pub include_dirs: bool,

    /// Neither watch nor trigger on dot-prefixed files and directories.
    pub ignore_hidden: bool,
}

impl WatchConfig {
    /// Checks that the root exists and is a directory.
    pub fn validate_root(&self) -> Result<()> {
        let meta = std::fs::metadata(&self.root).map_err(|source| WatchError::RootInaccessible {
            path: self.root.clone(),
            source,
        })?;

        if !meta.is_dir() {
            return Err(WatchError::NotADirectory(self.root.clone()));
        }

        Ok(())
    }
}

/// Returns true when the base name of `path` starts with a dot.
///
/// Paths without a base name (`/`, or ones ending in `..`) are never hidden.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
