// src/logging.rs

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::core::history::HISTORY_FILE;

/// Overrides the directory holding the log and the history file.
pub const DATA_DIR_VAR: &str = "VERITAS_DATA_DIR";

lazy_static! {
    /// `VERITAS_RS_LOGLEVEL`, read when `RUST_LOG` is unset.
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", env!("CARGO_CRATE_NAME").to_uppercase());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
    static ref DEFAULT_FILTER: String = format!("{}=info", env!("CARGO_CRATE_NAME"));
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Picks the log filter: `RUST_LOG`, then [`LOG_ENV`], then info for this crate.
fn log_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .or_else(|| lookup(LOG_ENV.as_str()))
        .unwrap_or_else(|| DEFAULT_FILTER.clone())
}

fn data_dir_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(DATA_DIR_VAR) {
        return PathBuf::from(dir);
    }
    match ProjectDirs::from("com", "veritas-rs", env!("CARGO_PKG_NAME")) {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => PathBuf::from(".").join(".data"),
    }
}

pub fn data_dir() -> PathBuf {
    data_dir_from(env_lookup)
}

/// Location of the persisted scan history.
pub fn history_path() -> PathBuf {
    data_dir().join(HISTORY_FILE)
}

/// Sends all tracing output to the log file in the data directory.
///
/// The terminal belongs to the TUI. The file is appended to so earlier
/// sessions stay readable after a failed run.
pub fn initialize_logging() -> Result<()> {
    let directory = data_dir();
    std::fs::create_dir_all(&directory)
        .wrap_err_with(|| format!("cannot create data directory {}", directory.display()))?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("cannot open log file {}", log_path.display()))?;

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(log_filter(env_lookup)));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Session started.");
    Ok(())
}
