use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_FILE: &str = "bot.log";

/// Installs the global subscriber: human-readable lines on stderr plus an
/// appended copy in `log_file`. `RUST_LOG` wins over `verbose` when set.
pub fn init(log_file: &Path, verbose: bool, json: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(fmt::layer().json().with_writer(Mutex::new(file)))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .try_init()
    };
    installed.context("Failed to install log subscriber")
}

/// Log-and-continue adapter for callers that want the bot's legacy
/// behaviour: a failed storage call is reported to the log and replaced by
/// an empty default (`()`, `false`, an empty `Vec`).
pub trait LogOnError<T> {
    fn or_log(self, what: &str) -> T;
}

impl<T: Default> LogOnError<T> for Result<T> {
    fn or_log(self, what: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                let message = format!("{:#}", err);
                tracing::error!(error = %message, "{} failed", what);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use tempfile::tempdir;

    #[test]
    fn test_or_log_passes_value_through() {
        let result: Result<Vec<i64>> = Ok(vec![1, 2]);
        assert_eq!(result.or_log("load"), vec![1, 2]);
    }

    #[test]
    fn test_or_log_defaults_on_error() {
        let dir = tempdir().unwrap();
        let db = Database::open(&dir.path().join("no_tables.db")).unwrap();

        assert!(db.all_chat_ids().or_log("all_chat_ids").is_empty());
        assert!(db.recent_issues().or_log("recent_issues").is_empty());
        assert!(!db.add_chat(9).or_log("add_chat"));
        assert_eq!(db.add_issue("t", None, None, "u", false).or_log("add_issue"), 0);
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("bot.log");

        // A subscriber may already be installed by another test; the file
        // is opened before that matters.
        let _ = init(&log_path, false, false);
        assert!(log_path.exists());
    }

    #[test]
    fn test_init_fails_on_missing_dir() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("missing").join("bot.log");
        assert!(init(&log_path, false, false).is_err());
    }
}
