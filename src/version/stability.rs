//! Filtering remote releases down to stable versions

use crate::version::ordering::StructuredVersion;

/// A version published on the remote index, parsed for comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub version: StructuredVersion,
    pub raw: String,
}

impl RemoteRelease {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            version: StructuredVersion::parse(&raw),
            raw,
        }
    }
}

/// Keep only the releases whose version is classified stable
pub fn filter_stable(releases: Vec<RemoteRelease>) -> Vec<RemoteRelease> {
    releases
        .into_iter()
        .filter(|release| release.version.is_stable())
        .collect()
}
