//! Notification backend.
//!
//! Wraps the notify crate behind a small trait so the registrar can be
//! driven by a fake in tests. Raw notify events are flattened into one
//! `WatchEvent` per path and pushed onto tokio channels for the dispatcher.

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::warn;

use crate::error::{Result, WatchError};

/// Operation kind of a filesystem event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
    Other,
}

/// A single path together with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub op: Op,
}

impl WatchEvent {
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }
}

/// Something directories can be registered with.
pub trait WatchBackend: Send {
    /// Registers a single directory (not its children).
    fn watch(&mut self, dir: &Path) -> std::result::Result<(), notify::Error>;
}

/// Event stream of a running backend.
pub type EventReceiver = UnboundedReceiver<WatchEvent>;

/// Error stream of a running backend.
pub type ErrorReceiver = UnboundedReceiver<notify::Error>;

/// Backend built on the platform's recommended notify watcher.
///
/// Dropping it releases the OS watch handle and closes both channels.
pub struct NotifyBackend {
    watcher: notify::RecommendedWatcher,
}

impl NotifyBackend {
    /// Creates the OS watcher and the channels its events are delivered on.
    pub fn new() -> Result<(Self, EventReceiver, ErrorReceiver)> {
        let (event_tx, event_rx) = unbounded_channel();
        let (error_tx, error_rx) = unbounded_channel();

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for change in translate(event) {
                    if event_tx.send(change).is_err() {
                        warn!("Dropping event, dispatcher is gone");
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = error_tx.send(e);
            }
        })
        .map_err(WatchError::Init)?;

        Ok((Self { watcher }, event_rx, error_rx))
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(&mut self, dir: &Path) -> std::result::Result<(), notify::Error> {
        self.watcher.watch(dir, RecursiveMode::NonRecursive)
    }
}

/// Maps a notify event kind onto an `Op`.
///
/// A rename into a watched directory counts as a creation. The paired
/// `Both` notification that may follow it is a plain rename so a single
/// move never yields two creations.
fn classify(kind: &EventKind) -> Op {
    match kind {
        EventKind::Create(_) => Op::Create,
        EventKind::Remove(_) => Op::Remove,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Op::Create,
        EventKind::Modify(ModifyKind::Name(_)) => Op::Rename,
        EventKind::Modify(ModifyKind::Metadata(_)) => Op::Chmod,
        EventKind::Modify(_) => Op::Write,
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Op::Other,
    }
}

/// Flattens one notify event into per-path events, preserving path order.
pub fn translate(event: Event) -> Vec<WatchEvent> {
    let op = classify(&event.kind);
    event
        .paths
        .into_iter()
        .map(|path| WatchEvent { path, op })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |ev, p| ev.add_path(PathBuf::from(p)))
    }

    #[test]
    fn test_create_events() {
        let changes = translate(event(EventKind::Create(CreateKind::File), &["/r/a.txt"]));
        assert_eq!(changes, vec![WatchEvent::new("/r/a.txt", Op::Create)]);

        let changes = translate(event(EventKind::Create(CreateKind::Folder), &["/r/sub"]));
        assert_eq!(changes, vec![WatchEvent::new("/r/sub", Op::Create)]);
    }

    #[test]
    fn test_move_into_tree_is_a_create() {
        let changes = translate(event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            &["/r/moved.txt"],
        ));
        assert_eq!(changes, vec![WatchEvent::new("/r/moved.txt", Op::Create)]);
    }

    #[test]
    fn test_paired_rename_is_not_a_create() {
        let changes = translate(event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/r/old", "/r/new"],
        ));
        assert_eq!(
            changes,
            vec![
                WatchEvent::new("/r/old", Op::Rename),
                WatchEvent::new("/r/new", Op::Rename),
            ]
        );
    }

    #[test]
    fn test_other_kinds() {
        let write = translate(event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/r/a"],
        ));
        assert_eq!(write[0].op, Op::Write);

        let chmod = translate(event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
            &["/r/a"],
        ));
        assert_eq!(chmod[0].op, Op::Chmod);

        let removed = translate(event(EventKind::Remove(RemoveKind::File), &["/r/a"]));
        assert_eq!(removed[0].op, Op::Remove);

        assert!(translate(event(EventKind::Any, &[])).is_empty());
    }

    #[test]
    fn test_backend_creation() {
        let backend = NotifyBackend::new();
        assert!(backend.is_ok());
    }
}
