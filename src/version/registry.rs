//! Registry trait for fetching published versions from a package index

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Trait for fetching the published versions of a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Short name of the index, used in reports (e.g. "pypi")
    fn name(&self) -> &'static str;

    /// Fetches every published version string of a package
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Raw version strings, in no particular order
    /// * `Err(RegistryError::NotFound)` - The index does not know the package
    /// * `Err(_)` - Any other transport or decoding failure
    async fn releases_for(&self, package_name: &str) -> Result<Vec<String>, RegistryError>;
}
