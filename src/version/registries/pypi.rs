//! PyPI registry client for fetching Python package versions

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registry::Registry;

/// PyPI registry client using the JSON API
pub struct PypiRegistry {
    client: Client,
    base_url: String,
}

impl PypiRegistry {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(concat!("pkg-update/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    releases: HashMap<String, Vec<PypiFile>>,
}

/// Uploaded file of a release; only its presence is checked
#[derive(Debug, Deserialize)]
struct PypiFile {}

#[async_trait]
impl Registry for PypiRegistry {
    fn name(&self) -> &'static str {
        "pypi"
    }

    async fn releases_for(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package_name);
        debug!("Fetching PyPI package: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !response.status().is_success() {
            return Err(RegistryError::InvalidResponse(format!(
                "PyPI API returned status {}",
                response.status()
            )));
        }

        let pypi_response: PypiResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;

        // A release without uploaded files has nothing to download
        let versions: Vec<String> = pypi_response
            .releases
            .into_iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(version, _)| version)
            .collect();

        debug!(
            "Found {} versions for package {}",
            versions.len(),
            package_name
        );

        Ok(versions)
    }
}
