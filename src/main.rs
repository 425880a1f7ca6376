use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use pkg_update::config::{ConfigError, UpdateConfig, log_path};
use pkg_update::logging;
use pkg_update::parser::DistributionFilenameParser;
use pkg_update::repository::DirectoryRepository;
use pkg_update::update::console::StdoutConsole;
use pkg_update::update::downloader::PipDownloader;
use pkg_update::update::run::{UpdateOptions, run_update};
use pkg_update::version::registries::PypiRegistry;

#[derive(Parser)]
#[command(name = "pkg-update")]
#[command(
    version,
    about = "Check a local package mirror for newer releases on PyPI and fetch them"
)]
struct Cli {
    /// Root directory of the local package mirror
    root: PathBuf,

    /// Directory to download updates into (default: next to each local file)
    dest_dir: Option<PathBuf>,

    /// Only print the planned downloads
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Let pre-releases count as updates
    #[arg(long)]
    include_prereleases: bool,

    /// Base URL of the package index
    #[arg(long)]
    index_url: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(&log_path());

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = UpdateConfig::load(cli.config.as_deref())?;
    if let Some(index_url) = cli.index_url {
        config.index_url = index_url;
    }
    if cli.include_prereleases {
        config.stable_only = false;
    }

    if !cli.root.is_dir() {
        return Err(ConfigError::RootNotADirectory(cli.root).into());
    }
    info!("Using configuration {:?}", config);

    let repository = DirectoryRepository::new(cli.root);
    let registry = PypiRegistry::new(
        &config.index_url,
        Duration::from_millis(config.fetch_timeout_ms),
    )?;
    let downloader = PipDownloader::new(
        &config.download.program,
        &config.simple_index_url(),
        Duration::from_millis(config.download.timeout_ms),
    );
    let options = UpdateOptions {
        stable_only: config.stable_only,
        dry_run: cli.dry_run,
        dest_dir: cli.dest_dir,
    };

    run_update(
        &repository,
        &DistributionFilenameParser::new(),
        &registry,
        &downloader,
        &options,
        &mut StdoutConsole,
    )
    .await;

    Ok(())
}
