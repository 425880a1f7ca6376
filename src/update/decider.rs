//! Update detection: compare each local package against the remote index

use tracing::{debug, info, warn};

use crate::update::console::{Console, Progress, ProgressLine};
use crate::update::inventory::{Inventory, PackageFileRecord};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::stability::{RemoteRelease, filter_stable};

/// A local package with a newer qualifying remote version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub record: PackageFileRecord,
    /// Raw remote version string to fetch
    pub latest_version: String,
}

/// A package whose remote lookup failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub name: String,
    pub error: String,
}

/// Result of checking an inventory against the remote index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Number of packages checked
    pub checked: usize,
    pub need_update: Vec<PendingUpdate>,
    /// Packages without any qualifying remote release, sorted
    pub no_releases_found: Vec<String>,
    pub lookup_failed: Vec<LookupFailure>,
}

/// Decision for a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    UpToDate,
    Update(String),
    NoReleases,
}

/// Decide whether `record` needs an update given the remote version strings
pub fn decide(record: &PackageFileRecord, releases: Vec<String>, stable_only: bool) -> Decision {
    let mut releases: Vec<RemoteRelease> = releases.into_iter().map(RemoteRelease::parse).collect();
    if stable_only {
        releases = filter_stable(releases);
    }

    // Equal versions spelled differently ("1.0", "1.0.0") tie-break on the raw string
    let latest = releases
        .into_iter()
        .max_by(|a, b| a.version.cmp(&b.version).then_with(|| a.raw.cmp(&b.raw)));

    match latest {
        None => Decision::NoReleases,
        Some(latest) if latest.version > record.structured_version => Decision::Update(latest.raw),
        Some(_) => Decision::UpToDate,
    }
}

/// Check every package of the inventory for a newer remote version.
///
/// Lookups run one at a time in inventory order. A package unknown to the
/// index counts as having no releases; any other lookup error is reported
/// separately and does not stop the scan.
pub async fn find_updates(
    inventory: &Inventory,
    registry: &dyn Registry,
    stable_only: bool,
    console: &mut dyn Console,
) -> UpdateReport {
    let mut report = UpdateReport {
        checked: inventory.len(),
        ..UpdateReport::default()
    };

    console.write(&format!(
        "checking {} packages for newer version\n",
        inventory.len()
    ));

    let mut progress = ProgressLine::new(console);
    for record in inventory {
        let releases = match registry.releases_for(&record.name).await {
            Ok(releases) => releases,
            Err(RegistryError::NotFound(_)) => {
                debug!("{} is unknown to {}", record.name, registry.name());
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to fetch releases for {}: {}", record.name, e);
                report.lookup_failed.push(LookupFailure {
                    name: record.name.clone(),
                    error: e.to_string(),
                });
                progress.mark(Progress::NoReleases);
                continue;
            }
        };

        match decide(record, releases, stable_only) {
            Decision::Update(latest_version) => {
                info!(
                    "{} needs update from {} to {}",
                    record.name, record.version, latest_version
                );
                report.need_update.push(PendingUpdate {
                    record: record.clone(),
                    latest_version,
                });
                progress.mark(Progress::UpdateFound);
            }
            Decision::NoReleases => {
                report.no_releases_found.push(record.name.clone());
                progress.mark(Progress::NoReleases);
            }
            Decision::UpToDate => progress.mark(Progress::UpToDate),
        }
    }
    progress.finish();

    report.no_releases_found.sort();
    write_summary(&report, registry.name(), console);
    report
}

fn write_summary(report: &UpdateReport, index_name: &str, console: &mut dyn Console) {
    if !report.no_releases_found.is_empty() {
        console.write(&format!(
            "no releases found on {} for {}\n\n",
            index_name,
            report.no_releases_found.join(", ")
        ));
    }

    if !report.lookup_failed.is_empty() {
        for failure in &report.lookup_failed {
            console.write(&format!(
                "lookup failed for {}: {}\n",
                failure.name, failure.error
            ));
        }
        console.write("\n");
    }
}
