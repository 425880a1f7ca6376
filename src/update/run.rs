//! One complete scan-and-decide pass

use std::path::PathBuf;

use tracing::info;

use crate::parser::traits::FilenameParser;
use crate::repository::PackageRepository;
use crate::update::console::Console;
use crate::update::decider::{UpdateReport, find_updates};
use crate::update::downloader::Downloader;
use crate::update::executor::{ApplyReport, apply};
use crate::update::inventory::Inventory;
use crate::version::registry::Registry;

/// Options of a single pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Only stable releases qualify as updates
    pub stable_only: bool,
    /// Report the planned downloads without running them
    pub dry_run: bool,
    /// Download into this directory instead of next to each local file
    pub dest_dir: Option<PathBuf>,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            stable_only: true,
            dry_run: false,
            dest_dir: None,
        }
    }
}

/// Outcome of a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped_files: usize,
    pub updates: UpdateReport,
    pub applied: ApplyReport,
}

/// Scan the repository, decide which packages have newer releases and
/// fetch them.
pub async fn run_update(
    repository: &dyn PackageRepository,
    parser: &dyn FilenameParser,
    registry: &dyn Registry,
    downloader: &dyn Downloader,
    options: &UpdateOptions,
    console: &mut dyn Console,
) -> RunSummary {
    info!("Scanning {:?}", repository.root());
    let inventory = Inventory::build(repository.package_files(), parser);

    let updates = find_updates(&inventory, registry, options.stable_only, console).await;
    let applied = apply(
        &updates.need_update,
        options.dest_dir.as_deref(),
        options.dry_run,
        downloader,
        console,
    )
    .await;

    let skipped_files = inventory.skipped().len();
    if skipped_files > 0 {
        console.write(&format!(
            "skipped {skipped_files} files without a recognizable name and version\n"
        ));
    }
    if !options.dry_run && applied.planned > 0 {
        console.write(&format!(
            "{} of {} updates downloaded\n",
            applied.downloaded.len(),
            applied.planned
        ));
    }

    info!(
        "Checked {} packages: {} updates, {} without releases, {} lookup failures",
        updates.checked,
        updates.need_update.len(),
        updates.no_releases_found.len(),
        updates.lookup_failed.len()
    );

    RunSummary {
        skipped_files,
        updates,
        applied,
    }
}
