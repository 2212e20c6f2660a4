//! Log file setup for folder-search.
//!
//! The TUI owns the terminal, so `tracing` output goes to a plain log file:
//! `$FDS_LOG_DIR/folder-search.log`, or `folder-search.log` under the platform's
//! local data directory.
//!
//! The filter comes from `$FDS_LOG` when set, else from `general.log_level`.
//! Logging is optional: any failure leaves the program running without it.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "FDS_LOG";
pub const LOG_DIR_ENV: &str = "FDS_LOG_DIR";
const LOG_FILE: &str = "folder-search.log";

/// Directory the log file is written to, if one can be determined.
pub fn log_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(LOG_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::data_local_dir().map(|d| d.join("folder-search"))
}

/// Builds the event filter from `$FDS_LOG` or `config_level`.
///
/// An unparsable filter falls back to `info`.
pub fn log_filter(env_level: Option<&str>, config_level: &str) -> EnvFilter {
    let level = env_level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(config_level);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Only the first call has an effect.
pub fn init_logging(config_level: &str) {
    let Some(dir) = log_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let env_level = std::env::var(LOG_ENV).ok();
    let filter = log_filter(env_level.as_deref(), config_level);

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_level_wins_over_config() {
        let filter = log_filter(Some("debug"), "warn");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn blank_env_level_uses_config() {
        let filter = log_filter(Some("  "), "warn");
        assert_eq!(filter.to_string(), "warn");
        let filter = log_filter(None, "error");
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn bad_filter_falls_back_to_info() {
        let filter = log_filter(None, "fds=loud");
        assert_eq!(filter.to_string(), "info");
    }
}
