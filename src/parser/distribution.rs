//! Python distribution file name parser
//!
//! Extracts the package name and version from the file names found in a
//! package mirror directory.
//!
//! Format examples:
//! - Source archive: `Django-1.5.tar.gz`, `python-dateutil-2.8.2.zip`
//! - Egg: `pkg-1.0-py2.7.egg`
//! - Windows installer: `pkg-1.0.win32-py2.7.exe`
//! - Wheel: `requests-2.31.0-py3-none-any.whl`
//! - Signature: `Django-1.5.tar.gz.asc`

use std::path::Path;

use regex::Regex;

use crate::parser::traits::{FilenameParser, ParseError};
use crate::parser::types::PackageFile;

/// Parser for distribution file names
pub struct DistributionFilenameParser {
    /// Regex for archive and platform suffixes: `.tar.gz`, `-py2.7-linux.egg`, ...
    archive_suffix_re: Regex,
    /// Regex for wheel stems: `name-version(-build)?-pyver-abi-plat`
    wheel_re: Regex,
    /// Regex for the start of the version: `-1.`, `-2a`, ...
    version_start_re: Regex,
    /// Regex for a platform tag following the version: `-py2`, `.linux`, ...
    platform_re: Regex,
}

impl DistributionFilenameParser {
    pub fn new() -> Self {
        Self {
            archive_suffix_re: Regex::new(
                r"(?i)(\.zip|\.tar\.gz|\.tgz|\.tar\.bz2|\.tar\.xz|-py[23]\.\d+-.*|\.win-amd64-py[23]\.\d+\..*|\.win32-py[23]\.\d+\..*|\.egg)$",
            )
            .unwrap(),
            wheel_re: Regex::new(
                r"^(?P<name>.+?)-(?P<version>\d.*?)(?:-\d.*?)?-(?:.+?)-(?:.+?)-(?:.+?)$",
            )
            .unwrap(),
            version_start_re: Regex::new(r"(?i)-\d+[a-z_.!+]").unwrap(),
            platform_re: Regex::new(
                r"(?i)[.\-](?:cp\d|py\d|macosx|linux|sunos|solaris|irix|aix|cygwin|win)",
            )
            .unwrap(),
        }
    }

    fn parse_wheel(&self, stem: &str) -> Result<(String, String), ParseError> {
        let captures = self
            .wheel_re
            .captures(stem)
            .ok_or_else(|| ParseError::MissingVersion(format!("{stem}.whl")))?;
        Ok((captures["name"].to_string(), captures["version"].to_string()))
    }

    fn parse_archive(&self, file_name: &str) -> (String, String) {
        let trimmed = self.archive_suffix_re.replace(file_name, "");
        let stem: &str = &trimmed;

        let (name, version) = if !stem.contains('-') {
            (stem, "")
        } else if stem.matches('-').count() == 1 || !stem.contains('.') {
            stem.rsplit_once('-').unwrap_or((stem, ""))
        } else {
            let name_end = self
                .version_start_re
                .find(stem)
                .map_or(stem.len(), |m| m.start());
            let rest = stem.get(name_end + 1..).unwrap_or("");
            let version_end = self.platform_re.find(rest).map_or(rest.len(), |m| m.start());
            (&stem[..name_end], &rest[..version_end])
        };

        (name.to_string(), version.to_string())
    }
}

impl Default for DistributionFilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameParser for DistributionFilenameParser {
    fn parse(&self, path: &Path) -> Result<PackageFile, ParseError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ParseError::InvalidFileName(path.to_path_buf()))?;

        let file_name = file_name.strip_suffix(".asc").unwrap_or(file_name);

        let (name, version) = match file_name.strip_suffix(".whl") {
            Some(stem) => self.parse_wheel(stem)?,
            None => self.parse_archive(file_name),
        };

        if name.is_empty() {
            return Err(ParseError::MissingName(file_name.to_string()));
        }
        if version.is_empty() {
            return Err(ParseError::MissingVersion(file_name.to_string()));
        }

        Ok(PackageFile::new(&name, &version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(file_name: &str) -> Result<PackageFile, ParseError> {
        DistributionFilenameParser::new().parse(Path::new(file_name))
    }

    #[rstest]
    #[case("pkg-1.0.tar.gz", "pkg", "1.0")]
    #[case("Django-1.5.tar.gz", "django", "1.5")]
    #[case("python-dateutil-2.8.2.tar.gz", "python-dateutil", "2.8.2")]
    #[case("foo-bar-1.0b1.zip", "foo-bar", "1.0b1")]
    #[case("package-20000101.zip", "package", "20000101")]
    #[case("some-package-20000101", "some-package", "20000101")]
    #[case("pkg-1.0-py2.7.egg", "pkg", "1.0")]
    #[case("pkg-1.0.win32-py2.7.exe", "pkg", "1.0")]
    #[case("pkg-3.0.win-amd64-py3.11.exe", "pkg", "3.0")]
    #[case("pkg-1.0.linux-x86_64.tar.gz", "pkg", "1.0")]
    #[case("pkg-1.0.tar.bz2", "pkg", "1.0")]
    #[case("pkg-1.0.tgz", "pkg", "1.0")]
    #[case("Pkg-1.0.TAR.GZ", "pkg", "1.0")]
    #[case("Django-1.5.tar.gz.asc", "django", "1.5")]
    fn parse_extracts_name_and_version_from_archives(
        #[case] file_name: &str,
        #[case] name: &str,
        #[case] version: &str,
    ) {
        assert_eq!(
            parse(file_name).unwrap(),
            PackageFile {
                name: name.to_string(),
                version: version.to_string(),
            }
        );
    }

    #[rstest]
    #[case("requests-2.31.0-py3-none-any.whl", "requests", "2.31.0")]
    #[case(
        "My_Pkg-1.0-cp311-cp311-manylinux_2_17_x86_64.whl",
        "my_pkg",
        "1.0"
    )]
    #[case("pkg-2.0-1-py2.py3-none-any.whl", "pkg", "2.0")]
    fn parse_extracts_name_and_version_from_wheels(
        #[case] file_name: &str,
        #[case] name: &str,
        #[case] version: &str,
    ) {
        let result = parse(file_name).unwrap();
        assert_eq!(result.name, name);
        assert_eq!(result.version, version);
    }

    #[test]
    fn parse_uses_only_the_file_name_of_a_path() {
        let result = DistributionFilenameParser::new()
            .parse(Path::new("/srv/mirror/d/Django-1.5.tar.gz"))
            .unwrap();
        assert_eq!(result.name, "django");
    }

    #[rstest]
    #[case("README")]
    #[case("index.html")]
    #[case("pkg-.tar.gz")]
    #[case("broken.whl")]
    fn parse_rejects_names_without_version(#[case] file_name: &str) {
        assert!(parse(file_name).is_err(), "{file_name}");
    }

    #[test]
    fn parse_rejects_missing_name() {
        assert!(matches!(
            parse("-1.0.tar.gz"),
            Err(ParseError::MissingName(_))
        ));
    }
}
