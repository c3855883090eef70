//! Error types for the watcher.
//!
//! Startup failures and runtime failures share one enum. Whether an
//! error is fatal is decided by the caller: the binary exits on errors
//! raised during startup, the dispatcher only logs the ones it sees.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Convenience type for fallible watcher operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Things that can go wrong while watching a tree or running the command.
#[derive(Error, Debug)]
pub enum WatchError {
    /// The root directory could not be stat'ed.
    #[error("Error accessing directory '{path}': {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root exists but is a file (or something else).
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// The notification backend could not be created.
    #[error("Error creating watcher: {0}")]
    Init(#[source] notify::Error),

    /// A single directory could not be registered with the backend.
    #[error("failed to watch {path}: {source}")]
    Register {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Walking a directory tree hit an unreadable entry.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The command could not be started at all.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but did not exit successfully.
    #[error("'{command}' exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },
}

impl WatchError {
    /// Creates a registration error with the offending path for context.
    pub fn register(path: impl Into<PathBuf>, source: notify::Error) -> Self {
        Self::Register {
            path: path.into(),
            source,
        }
    }
}
