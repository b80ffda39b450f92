//! Tracing setup.
//!
//! Filters come from `SHEETCHART_LOG`, then `RUST_LOG`, then the default
//! directive. The interactive UI owns the terminal, so there logs go to a file.

use directories::ProjectDirs;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "SHEETCHART_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";
const TUI_DEFAULT_DIRECTIVE: &str = "sheetchart=info,sheetchart_core=info,sheetchart_extract=info";

fn env_filter(default: &str) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Log to stderr for one-shot command line runs.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVE))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Log to `<data dir>/sheetchart.log` while the terminal UI is up.
///
/// Returns the log path, or `None` when no log file could be opened (logging is then off).
pub fn init_file() -> Option<PathBuf> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;
    let _ = tracing_subscriber::registry()
        .with(env_filter(TUI_DEFAULT_DIRECTIVE))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();
    Some(path)
}

fn log_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetchart")?;
    Some(proj.data_local_dir().join("sheetchart.log"))
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
