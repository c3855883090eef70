//! Spawnwatch Watcher - recursive watching and command dispatch
//!
//! This crate does the actual work behind the `spawnwatch` binary:
//! - Registering every directory of a tree with the OS notifier
//! - Growing the watch set as new directories appear
//! - Running a command for every newly created file
//!
//! # Example
//!
//! ```no_run
//! use spawnwatch_watcher::{
//!     Dispatcher, NotifyBackend, ProcessRunner, WatchConfig, WatchRegistrar,
//! };
//! use std::path::PathBuf;
//!
//! # async fn demo() -> spawnwatch_watcher::Result<()> {
//! let config = WatchConfig {
//!     root: PathBuf::from("/tmp/drop"),
//!     command: "echo".to_string(),
//!     args: vec!["new:".to_string()],
//!     include_dirs: false,
//!     ignore_hidden: true,
//! };
//! config.validate_root()?;
//!
//! let (backend, events, errors) = NotifyBackend::new()?;
//! let mut registrar = WatchRegistrar::new(backend, config.ignore_hidden);
//! registrar.register_tree(&config.root)?;
//!
//! let runner = ProcessRunner::new(config.command.clone(), config.args.clone());
//! Dispatcher::new(registrar, runner, &config).run(events, errors).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registrar;
pub mod runner;
mod watcher;

pub use config::{is_hidden, WatchConfig};
pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{Result, WatchError};
pub use registrar::WatchRegistrar;
pub use runner::{CommandRunner, ProcessRunner};
pub use watcher::{
    translate, ErrorReceiver, EventReceiver, NotifyBackend, Op, WatchBackend, WatchEvent,
};
