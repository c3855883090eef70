//! Spawnwatch CLI - run a command whenever something new shows up
//!
//! Watches a directory tree and invokes the given command with each
//! newly created path appended to its arguments.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Set up logging. Stderr keeps our lines apart from the child's stdout.
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    if let Err(e) = commands::watch(cli.into_config()).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
