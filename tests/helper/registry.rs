//! Registry and downloader test utilities

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use pkg_update::update::downloader::Downloader;
use pkg_update::version::error::{DownloadError, RegistryError};
use pkg_update::version::registry::Registry;

/// In-memory registry for testing
#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<String, Vec<String>>,
    unreachable: Vec<String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Lookups of `package` fail with a transport-level error
    pub fn with_unreachable(mut self, package: &str) -> Self {
        self.unreachable.push(package.to_string());
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn name(&self) -> &'static str {
        "pypi"
    }

    async fn releases_for(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        if self.unreachable.iter().any(|name| name == package_name) {
            return Err(RegistryError::InvalidResponse(
                "PyPI API returned status 502 Bad Gateway".to_string(),
            ));
        }
        match self.versions.get(package_name) {
            Some(versions) => Ok(versions.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// A download request seen by [`RecordingDownloader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub name: String,
    pub version: String,
    pub target_dir: PathBuf,
}

/// Downloader that records calls and fails for selected packages
#[derive(Default)]
pub struct RecordingDownloader {
    calls: Mutex<Vec<FetchCall>>,
    failing: Vec<String>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, package: &str) -> Self {
        self.failing.push(package.to_string());
        self
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    fn describe(&self, name: &str, version: &str, target_dir: &Path) -> String {
        format!("fetch {name}=={version} into {}", target_dir.display())
    }

    async fn fetch(
        &self,
        name: &str,
        version: &str,
        target_dir: &Path,
    ) -> Result<(), DownloadError> {
        self.calls.lock().unwrap().push(FetchCall {
            name: name.to_string(),
            version: version.to_string(),
            target_dir: target_dir.to_path_buf(),
        });
        if self.failing.iter().any(|failing| failing == name) {
            return Err(DownloadError::Failed {
                program: "pip".to_string(),
                status: Some(1),
            });
        }
        Ok(())
    }
}
