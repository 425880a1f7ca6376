//! Common types for parsers

/// Package name and version derived from a distribution file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    /// Lower-cased package name (e.g., "django", "python-dateutil")
    pub name: String,
    /// Raw version string as found in the file name
    pub version: String,
}

impl PackageFile {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases_name_but_not_version() {
        let file = PackageFile::new("Django", "1.5RC1");
        assert_eq!(file.name, "django");
        assert_eq!(file.version, "1.5RC1");
    }
}
