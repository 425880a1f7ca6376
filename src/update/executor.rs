//! Applying pending updates through a downloader

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::update::console::Console;
use crate::update::decider::PendingUpdate;
use crate::update::downloader::Downloader;
use crate::update::inventory::containing_dir;

/// A download that failed for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub name: String,
    pub version: String,
    pub error: String,
}

/// Outcome of applying a batch of updates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Updates reported, whether executed or not
    pub planned: usize,
    /// Names of the packages fetched successfully
    pub downloaded: Vec<String>,
    pub failed: Vec<DownloadFailure>,
}

/// Directory an update is fetched into: `dest_dir` if given, else the
/// directory holding the local file
pub fn target_dir(update: &PendingUpdate, dest_dir: Option<&Path>) -> PathBuf {
    dest_dir.map_or_else(|| containing_dir(&update.record.path), Path::to_path_buf)
}

/// Report and, unless `dry_run`, fetch every pending update.
///
/// A failed download is reported and the remaining updates still run.
pub async fn apply(
    updates: &[PendingUpdate],
    dest_dir: Option<&Path>,
    dry_run: bool,
    downloader: &dyn Downloader,
    console: &mut dyn Console,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for update in updates {
        let record = &update.record;
        let target = target_dir(update, dest_dir);

        console.write(&format!(
            "# update {} from {} to {}\n",
            record.name, record.version, update.latest_version
        ));
        console.write(&format!(
            "{}\n\n",
            downloader.describe(&record.name, &update.latest_version, &target)
        ));
        report.planned += 1;

        if dry_run {
            continue;
        }

        match downloader
            .fetch(&record.name, &update.latest_version, &target)
            .await
        {
            Ok(()) => {
                info!(
                    "Fetched {}=={} into {:?}",
                    record.name, update.latest_version, target
                );
                report.downloaded.push(record.name.clone());
            }
            Err(e) => {
                error!(
                    "Failed to fetch {}=={}: {}",
                    record.name, update.latest_version, e
                );
                console.write(&format!(
                    "# failed to update {}: {}\n\n",
                    record.name, e
                ));
                report.failed.push(DownloadFailure {
                    name: record.name.clone(),
                    version: update.latest_version.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
