//! Tracing setup for the installer.
//!
//! Events append to `$XDG_STATE_HOME/sysroot/sysroot.log`. If that file cannot
//! be opened the caller falls back to [`init_logging_stderr`]. `RUST_LOG`
//! replaces [`DEFAULT_FILTER`] when set.

use anyhow::{anyhow, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,sysroot_core=debug,sysroot_cli=debug";

/// Where [`init_logging`] writes; the state directory is created if missing.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sysroot")?;
    Ok(xdg_dirs.place_state_file("sysroot.log")?)
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Log to the XDG state file. Returns the file path.
/// Errors (unwritable state dir, subscriber already set) leave logging uninitialized.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    tracing::debug!("logging to {}", path.display());
    Ok(path)
}

/// Log to stderr only. Never fails; a second call is ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

fn env_filter() -> EnvFilter {
    filter_or_default(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn filter_or_default(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
