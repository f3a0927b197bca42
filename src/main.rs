mod cache;
mod error;
mod extract;
mod ids;
mod installer;
mod paths;
mod platform;
mod remote;
mod runner;
mod version;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::DirCache;
use ids::RandomIds;
use installer::{InstallRequest, Installer, InstallerConfig};
use remote::HttpRemote;
use runner::ProcessRunner;

#[derive(Debug, Parser)]
#[clap(name = "setup-gauge", version = env!("CARGO_PKG_VERSION"), about = "Set up gauge and its plugins on a CI runner")]
struct Cli {
    /// Gauge version to install: a release version, `master` to build
    /// from source, or empty for the latest release
    #[clap(long, env = "GAUGE_VERSION", default_value = "")]
    gauge_version: String,

    /// Comma-separated gauge plugins to install
    #[clap(long, env = "GAUGE_PLUGINS", default_value = "")]
    gauge_plugins: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let request = InstallRequest::new(&cli.gauge_version, &cli.gauge_plugins);

    let remote = HttpRemote::new().context("failed to build the HTTP client")?;
    let cache = DirCache::new(cache_root()?);
    let runner = ProcessRunner;
    let ids = RandomIds;
    let config = InstallerConfig::from_host(temp_root());
    let installer = Installer::new(config, &remote, &cache, &runner, &ids);

    let installation = installer.acquire(&request.version)?;
    info!(
        "gauge {} ready at {}",
        installation.version,
        installation.dir.display()
    );
    paths::expose(&installation.dir)?;
    installer.install_plugins(&request.plugins)?;
    Ok(())
}

/// Scratch space for downloads and checkouts, reclaimed by the runner.
fn temp_root() -> PathBuf {
    env::var_os("RUNNER_TEMP")
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir)
}

/// Durable tool cache shared across jobs on the same runner.
fn cache_root() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("RUNNER_TOOL_CACHE") {
        return Ok(PathBuf::from(dir));
    }
    dirs::cache_dir()
        .map(|dir| dir.join("setup-gauge"))
        .context("failed to determine a tool cache directory")
}
