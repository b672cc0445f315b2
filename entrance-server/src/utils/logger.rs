//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "entrance-server";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// `RUST_LOG` wins over the configured level
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logger with optional file output
///
/// `json` switches to one JSON object per line (production). When `log_dir`
/// exists, output goes to a daily rolling file there instead of stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&Path>) {
    let filter = env_filter(log_level.unwrap_or("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir.filter(|d| d.is_dir()) {
        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let subscriber = subscriber.with_ansi(false).with_writer(file_appender);
        let _ = if json {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        };
        return;
    }

    let _ = if json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}
