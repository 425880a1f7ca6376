//! Tracing setup
//!
//! Logs go to a file in the data directory so they never interleave with the
//! progress markers on stdout.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV_VAR;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging to `log_path`, falling back to stderr when its
/// directory cannot be created.
///
/// The returned guard must be held until exit to flush buffered lines.
pub fn init(log_path: &Path) -> Option<WorkerGuard> {
    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .map_or_else(|| "pkg-update.log".into(), |name| name.to_os_string());

    if let Err(e) = std::fs::create_dir_all(directory) {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
        tracing::warn!("Failed to create log directory {:?}: {}", directory, e);
        return None;
    }

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
