//! Local package repository: enumerates the distribution files of a mirror

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Source of local package files
pub trait PackageRepository {
    /// Root directory of the repository
    fn root(&self) -> &Path;

    /// All package file paths, in a stable order
    fn package_files(&self) -> Vec<PathBuf>;
}

/// Repository backed by a directory tree
///
/// Hidden files and directories are skipped and symlinks are not followed.
pub struct DirectoryRepository {
    root: PathBuf,
}

impl DirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

impl PackageRepository for DirectoryRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn package_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {:?}: {}", self.root, e),
            }
        }

        debug!("Found {} files under {:?}", files.len(), self.root);
        files
    }
}
