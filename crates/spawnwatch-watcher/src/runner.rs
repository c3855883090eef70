//! Command execution.
//!
//! Runs the configured command with the new path appended, streaming the
//! child's output straight to ours. Failures are logged, never returned
//! to the event loop.

use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::{Result, WatchError};

/// Something that reacts to a new path.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs to completion. Errors are reported by the runner itself.
    async fn run(&self, path: &Path);
}

/// Spawns an external process per path.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    command: String,
    args: Vec<String>,
}

impl ProcessRunner {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Runs `command args... path` and waits for it to exit.
    pub async fn execute(&self, path: &Path) -> Result<ExitStatus> {
        debug!("Running {} {:?} {}", self.command, self.args, path.display());

        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| WatchError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(WatchError::CommandFailed {
                command: self.command.clone(),
                status,
            });
        }

        Ok(status)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, path: &Path) {
        if let Err(e) = self.execute(path).await {
            error!("Error running command: {}", e);
        }
    }
}
