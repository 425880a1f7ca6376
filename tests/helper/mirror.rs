//! Local mirror test utilities

use std::fs;

use tempfile::TempDir;

/// Create a temporary mirror directory containing empty files at `paths`
pub fn create_test_mirror(paths: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for path in paths {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, b"").unwrap();
    }
    temp_dir
}
