//! Downloading distributions into a target directory

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::{DEFAULT_DOWNLOAD_PROGRAM, DEFAULT_INDEX_URL, DOWNLOAD_TIMEOUT_MS};
use crate::version::error::DownloadError;

/// Trait for fetching a specific package version into a directory
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Downloader: Send + Sync {
    /// Human readable form of the operation, shown before it runs
    fn describe(&self, name: &str, version: &str, target_dir: &Path) -> String;

    /// Fetch `name==version` into `target_dir`
    async fn fetch(
        &self,
        name: &str,
        version: &str,
        target_dir: &Path,
    ) -> Result<(), DownloadError>;
}

/// Downloads with `pip download` from a simple index
pub struct PipDownloader {
    program: String,
    index_url: String,
    timeout: Duration,
}

impl Default for PipDownloader {
    fn default() -> Self {
        Self::new(
            DEFAULT_DOWNLOAD_PROGRAM,
            &format!("{DEFAULT_INDEX_URL}/simple"),
            Duration::from_millis(DOWNLOAD_TIMEOUT_MS),
        )
    }
}

impl PipDownloader {
    pub fn new(program: &str, index_url: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            index_url: index_url.to_string(),
            timeout,
        }
    }

    fn args(&self, name: &str, version: &str, target_dir: &Path) -> Vec<String> {
        vec![
            "-q".to_string(),
            "download".to_string(),
            "-i".to_string(),
            self.index_url.clone(),
            "-d".to_string(),
            target_dir.display().to_string(),
            format!("{name}=={version}"),
        ]
    }
}

#[async_trait::async_trait]
impl Downloader for PipDownloader {
    fn describe(&self, name: &str, version: &str, target_dir: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args(name, version, target_dir));
        parts.join(" ")
    }

    async fn fetch(
        &self,
        name: &str,
        version: &str,
        target_dir: &Path,
    ) -> Result<(), DownloadError> {
        debug!("Running {}", self.describe(name, version, target_dir));

        // kill_on_drop reaps the child on every early return below
        let mut child = Command::new(&self.program)
            .args(self.args(name, version, target_dir))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DownloadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let waited = tokio::time::timeout(self.timeout, child.wait()).await;
        match waited {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(DownloadError::Failed {
                program: self.program.clone(),
                status: status.code(),
            }),
            Ok(Err(source)) => Err(DownloadError::Wait {
                program: self.program.clone(),
                source,
            }),
            Err(_) => {
                warn!("{} {}=={} timed out, killing it", self.program, name, version);
                let _ = child.kill().await;
                Err(DownloadError::TimedOut(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader(program: &str, timeout: Duration) -> PipDownloader {
        PipDownloader::new(program, "https://pypi.org/simple", timeout)
    }

    #[test]
    fn describe_renders_full_command_line() {
        let command = PipDownloader::default().describe("foo", "1.1", Path::new("/srv/mirror"));

        assert_eq!(
            command,
            "pip -q download -i https://pypi.org/simple -d /srv/mirror foo==1.1"
        );
    }

    #[tokio::test]
    async fn fetch_reports_missing_program_as_spawn_error() {
        let result = downloader("pkg-update-no-such-program", Duration::from_secs(5))
            .fetch("foo", "1.1", Path::new("."))
            .await;

        assert!(matches!(result, Err(DownloadError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fetch_succeeds_when_program_exits_zero() {
        let result = downloader("true", Duration::from_secs(5))
            .fetch("foo", "1.1", Path::new("."))
            .await;

        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fetch_reports_non_zero_exit_status() {
        let result = downloader("false", Duration::from_secs(5))
            .fetch("foo", "1.1", Path::new("."))
            .await;

        assert!(matches!(
            result,
            Err(DownloadError::Failed {
                status: Some(1),
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fetch_times_out_slow_programs() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let script = temp_dir.path().join("slow-pip");
        std::fs::write(&script, "#!/bin/sh\nsleep 10\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = downloader(script.to_str().unwrap(), Duration::from_millis(100))
            .fetch("foo", "1.1", temp_dir.path())
            .await;

        assert!(matches!(result, Err(DownloadError::TimedOut(_))));
    }
}
