//! Parser trait definition

use std::path::{Path, PathBuf};

use crate::parser::types::PackageFile;

/// Trait for deriving a package name and version from a file path
pub trait FilenameParser {
    /// Parse the file name of `path` into a package name and version
    fn parse(&self, path: &Path) -> Result<PackageFile, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The path has no file name, or it is not valid UTF-8
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(PathBuf),

    /// No package name could be split off the file name
    #[error("Missing package name in {0}")]
    MissingName(String),

    /// No version could be split off the file name
    #[error("Missing version in {0}")]
    MissingVersion(String),
}
