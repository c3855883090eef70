//! Startup sequence.

use spawnwatch_watcher::{Dispatcher, NotifyBackend, ProcessRunner, WatchConfig, WatchRegistrar};
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Validates the root, registers the tree, then watches until killed.
///
/// Every error returned from here is a startup failure. Once the
/// dispatcher is running, failures are logged and never surface.
pub async fn watch(config: WatchConfig) -> Result<()> {
    config.validate_root()?;

    let (backend, events, errors) = NotifyBackend::new()?;
    let mut registrar = WatchRegistrar::new(backend, config.ignore_hidden);
    registrar.register_tree(&config.root)?;

    let runner = ProcessRunner::new(config.command.clone(), config.args.clone());
    let dispatcher = Dispatcher::new(registrar, runner, &config);
    tokio::spawn(dispatcher.run(events, errors));

    info!(
        "Recursive watching started at: {} (include dirs: {}, ignore hidden: {})",
        config.root.display(),
        config.include_dirs,
        config.ignore_hidden
    );

    // Only an external signal ends the process.
    std::future::pending::<()>().await;

    Ok(())
}
