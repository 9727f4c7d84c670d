//! Terminal client entry point.
mod ai;
mod app;
mod config;
mod input;
mod presentation;
mod scenario;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::App;
use config::{Args, CliConfig};
use presentation::{Screen, terminal};
use runtime::{FileSaveRepository, RuntimeConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse(std::env::args().skip(1)).context("invalid command line")?;
    let config = CliConfig::from_env();
    let runtime = RuntimeConfig::from_env();

    setup_logging(&config.log_dir)?;
    tracing::info!(
        players = args.players,
        resume = ?args.resume,
        saves = %config.save_dir.display(),
        "starting kingdoms"
    );

    let saves = FileSaveRepository::new(&config.save_dir)
        .with_context(|| format!("cannot open save directory {}", config.save_dir.display()))?;

    let tui = terminal::init().context("failed to set up the terminal")?;
    let _guard = terminal::TerminalGuard;
    let screen = Screen::shared(tui);

    App::new(args, runtime, Arc::new(saves), screen).run().await
}

/// Logs to a file only; the terminal belongs to the UI.
fn setup_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "kingdoms.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Log file: {}/kingdoms.log", log_dir.display());
    Ok(())
}
