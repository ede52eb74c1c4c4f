//! Logging configuration using tracing
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file.

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_ENV: &str = "KARROT_LOG";
const LOG_FILE: &str = "karrot.log";

/// Initialize the logging subsystem
///
/// Log level is controlled by the `KARROT_LOG` environment variable.
///
/// # Examples
/// ```bash
/// KARROT_LOG=debug karrot
/// KARROT_LOG=karrot=trace karrot --mute
/// ```
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("karrot=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(log_dir = %log_dir.display(), "karrot starting");

    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    ProjectDirs::from("", "", "karrot")
        .map(|pd| pd.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
