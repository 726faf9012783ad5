//! File logging for the native runtime.
//!
//! The terminal is owned by the UI, so log output goes to
//! `<data_dir>/amiibo-tui.log`. The level comes from `LOG_LEVEL` (default `info`).

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub const LOG_FILE_NAME: &str = "amiibo-tui.log";

/// Parses a `LOG_LEVEL` value, falling back to `INFO` for unknown names.
pub fn level_from_env(value: Option<&str>) -> Level {
    value
        .and_then(|raw| raw.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}

/// Installs the global subscriber writing to the log file in `data_dir`.
pub fn init(data_dir: &Path) -> Result<()> {
    let path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let level = level_from_env(std::env::var("LOG_LEVEL").ok().as_deref());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    Ok(())
}
