//! Tracing configuration and log routing.
//!
//! Every event goes to stdout. A second, ANSI-free copy is written through a non-blocking
//! appender: to `LEXIMIND_LOG_FILE` when set, otherwise to a daily-rotated
//! `<data_dir>/logs/leximind.log.<date>`.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;

const LOG_FILE_ENV: &str = "LEXIMIND_LOG_FILE";
const LOG_FILE_PREFIX: &str = "leximind.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where the file copy of the logs is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to one fixed file.
    File(PathBuf),
    /// Rotate daily inside a directory.
    Daily(PathBuf),
}

impl LogTarget {
    /// Explicit file when `override_path` is set, else daily files under `<data_dir>/logs`.
    pub fn resolve(override_path: Option<&str>, data_dir: &Path) -> Self {
        match override_path.map(str::trim).filter(|path| !path.is_empty()) {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Daily(data_dir.join("logs")),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` filters events (default `info`).
pub fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    let target = LogTarget::resolve(std::env::var(LOG_FILE_ENV).ok().as_deref(), &config.data_dir);
    match open_writer(&target) {
        Ok(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false);
            registry.with(file_layer).init();
        }
        Err(err) => {
            registry.init();
            tracing::warn!(log_target = ?target, error = %err, "File logging disabled");
        }
    }
}

fn open_writer(target: &LogTarget) -> std::io::Result<NonBlocking> {
    let (writer, guard) = match target {
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        LogTarget::Daily(dir) => {
            std::fs::create_dir_all(dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        }
    };
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}
