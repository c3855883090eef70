//! Event dispatch.
//!
//! Consumes the backend's event and error streams. Creations of
//! directories grow the watch set; creations of files (and, optionally,
//! directories) run the command. Commands run one at a time: the loop
//! waits for each child to exit before looking at the next event.

use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::config::{is_hidden, WatchConfig};
use crate::registrar::WatchRegistrar;
use crate::runner::CommandRunner;
use crate::watcher::{ErrorReceiver, EventReceiver, Op, WatchBackend, WatchEvent};

/// What the dispatcher did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a creation.
    Ignored,
    /// Hidden path with hidden filtering enabled.
    HiddenSkipped,
    /// A new directory was registered; `triggered` tells whether the command ran.
    Directory { triggered: bool },
    /// The command ran for a new file.
    File,
}

/// Turns filesystem events into registrations and command runs.
///
/// Owns the registrar, so every registration after startup happens on
/// the dispatcher's task.
pub struct Dispatcher<B, R> {
    registrar: WatchRegistrar<B>,
    runner: R,
    include_dirs: bool,
    ignore_hidden: bool,
}

impl<B: WatchBackend, R: CommandRunner> Dispatcher<B, R> {
    /// Creates a dispatcher around an already populated registrar.
    pub fn new(registrar: WatchRegistrar<B>, runner: R, config: &WatchConfig) -> Self {
        Self {
            registrar,
            runner,
            include_dirs: config.include_dirs,
            ignore_hidden: config.ignore_hidden,
        }
    }

    /// Handles a single event.
    pub async fn handle_event(&mut self, event: WatchEvent) -> Dispatch {
        if event.op != Op::Create {
            debug!("Skipping {:?} on {}", event.op, event.path.display());
            return Dispatch::Ignored;
        }

        let path = event.path.as_path();

        if self.ignore_hidden && is_hidden(path) {
            info!("Ignoring hidden: {}", path.display());
            return Dispatch::HiddenSkipped;
        }

        // A failed stat (e.g. the entry vanished already) is treated as a file.
        let is_dir = tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);

        if is_dir {
            info!("New directory detected: {}", path.display());
            // Synchronous walk: the loop takes no further events until it is done.
            if let Err(e) = self.registrar.register_tree(path) {
                warn!("Error watching new directory: {}", e);
            }
            if self.include_dirs {
                self.runner.run(path).await;
            }
            Dispatch::Directory {
                triggered: self.include_dirs,
            }
        } else {
            info!("New file detected: {}", path.display());
            self.runner.run(path).await;
            Dispatch::File
        }
    }

    /// Runs until both streams are closed, then hands itself back.
    pub async fn run(mut self, mut events: EventReceiver, mut errors: ErrorReceiver) -> Self {
        let mut events_open = true;
        let mut errors_open = true;

        loop {
            tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(event) => {
                        self.handle_event(event).await;
                    }
                    None => {
                        debug!("Event stream closed");
                        events_open = false;
                    }
                },
                err = errors.recv(), if errors_open => match err {
                    Some(e) => error!("Watcher error: {}", e),
                    None => {
                        debug!("Error stream closed");
                        errors_open = false;
                    }
                },
                else => break,
            }
        }

        self
    }

    /// The registrar and its watch set.
    pub fn registrar(&self) -> &WatchRegistrar<B> {
        &self.registrar
    }

    /// The runner commands are handed to.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Whether `dir` has been registered.
    pub fn is_watched(&self, dir: &Path) -> bool {
        self.registrar.is_watched(dir)
    }
}
