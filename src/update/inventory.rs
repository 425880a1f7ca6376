//! Local inventory: the highest local version of each package

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, warn};

use crate::parser::traits::FilenameParser;
use crate::parser::types::PackageFile;
use crate::version::ordering::StructuredVersion;

/// A package file found in the local repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFileRecord {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    pub structured_version: StructuredVersion,
}

impl PackageFileRecord {
    pub fn new(path: PathBuf, file: PackageFile) -> Self {
        let structured_version = StructuredVersion::parse(&file.version);
        Self {
            path,
            name: file.name,
            version: file.version,
            structured_version,
        }
    }
}

/// One record per package name, holding its highest local version
///
/// Records iterate in first-seen order.
#[derive(Debug, Default)]
pub struct Inventory {
    records: IndexMap<String, PackageFileRecord>,
    skipped: Vec<PathBuf>,
}

impl Inventory {
    /// Build the inventory from the local file paths.
    ///
    /// Paths the parser rejects are skipped and remembered. On equal
    /// versions the first path seen wins.
    pub fn build<I>(paths: I, parser: &dyn FilenameParser) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut inventory = Self::default();

        for path in paths {
            match parser.parse(&path) {
                Ok(file) => inventory.insert(PackageFileRecord::new(path, file)),
                Err(e) => {
                    warn!("Skipping {:?}: {}", path, e);
                    inventory.skipped.push(path);
                }
            }
        }

        debug!(
            "Inventory holds {} packages, {} files skipped",
            inventory.records.len(),
            inventory.skipped.len()
        );
        inventory
    }

    fn insert(&mut self, record: PackageFileRecord) {
        match self.records.entry(record.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
            Entry::Occupied(mut entry) => {
                if record.structured_version > entry.get().structured_version {
                    entry.insert(record);
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PackageFileRecord> {
        self.records.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageFileRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Paths whose file name could not be parsed
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a PackageFileRecord;
    type IntoIter = indexmap::map::Values<'a, String, PackageFileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

/// Directory holding a record's file, `.` for a bare file name
pub fn containing_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
