// Fax Beeper - a pager that prints paper cards
//
// Type a message on the beeper (or have Gemini write one), press PRINT, and
// it comes out as a paper card on the desk. Cards can be dragged around,
// raised by clicking and torn off with [x].
//
// Architecture:
// - Cards: the card store, the only state that outlives a keystroke
// - Generator: the auto-generate text source (Gemini over HTTP)
// - TUI (ratatui): desk, cards and device; owns the event loop
// - Background tasks (typewriter timers, generation) talk to the UI loop
//   through an mpsc channel of AppEvents

mod cards;
mod cli;
mod config;
mod generator;
mod logging;
mod tui;

use anyhow::{Context, Result};
use config::{Config, LogRotation, LoggingConfig};
use generator::{GeminiSource, Generator};
use logging::{CaptureLayer, LogBuffer};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands (config, generate) before starting the TUI
    if cli::handle_cli().await? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::load()?;

    // Logs are captured to a buffer: stdout belongs to the alternate screen
    let log_buffer = LogBuffer::new();

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = init_tracing(&config.logging, &log_buffer);

    tracing::debug!(
        version = config::VERSION,
        model = %config.generator.model,
        "configuration loaded"
    );

    let source = GeminiSource::new(&config.generator).context("Failed to set up generator")?;
    let generator = Generator::new(Arc::new(source));

    tui::run_tui(config, generator, log_buffer).await
}

/// Initialize tracing: buffer capture plus optional JSON log files
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(logging: &LoggingConfig, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("fax_beeper={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(CaptureLayer::new(log_buffer.clone()));

    if !logging.file_enabled {
        registry.init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        registry.init();
        tracing::warn!(
            "Could not create log directory {:?}: {}",
            logging.file_dir,
            e
        );
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Non-blocking writer (writes happen in background thread)
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer uses JSON format for structured log parsing
    registry
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}
