use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::cache::ToolCache;
use crate::error::InstallError;
use crate::extract;
use crate::ids::IdSource;
use crate::platform::{DownloadArch, ExecArch, Platform};
use crate::remote::Remote;
use crate::runner::CommandRunner;
use crate::version::{
    self, DownloadTarget, GAUGE_REPO_URL, LATEST_RELEASE_URL, SOURCE_MARKER, VersionSpec,
};

pub const TOOL_NAME: &str = "gauge";

/// Parsed job inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub version: VersionSpec,
    pub plugins: Vec<String>,
}

impl InstallRequest {
    pub fn new(version: &str, plugins: &str) -> Self {
        Self {
            version: VersionSpec::parse(version),
            plugins: parse_plugins(plugins),
        }
    }
}

fn parse_plugins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|plugin| !plugin.is_empty())
        .map(String::from)
        .collect()
}

/// Host facts and directories the engine needs, passed in explicitly so
/// it never reads ambient process state.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    pub temp_root: PathBuf,
    pub platform: Platform,
    pub download_arch: DownloadArch,
    pub exec_arch: ExecArch,
}

impl InstallerConfig {
    pub fn from_host(temp_root: PathBuf) -> Self {
        Self {
            temp_root,
            platform: Platform::current(),
            download_arch: DownloadArch::current(),
            exec_arch: ExecArch::current(),
        }
    }
}

/// A ready-to-use gauge directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub dir: PathBuf,
    pub version: String,
}

pub struct Installer<'a> {
    config: InstallerConfig,
    remote: &'a dyn Remote,
    cache: &'a dyn ToolCache,
    runner: &'a dyn CommandRunner,
    ids: &'a dyn IdSource,
}

impl<'a> Installer<'a> {
    pub fn new(
        config: InstallerConfig,
        remote: &'a dyn Remote,
        cache: &'a dyn ToolCache,
        runner: &'a dyn CommandRunner,
        ids: &'a dyn IdSource,
    ) -> Self {
        Self {
            config,
            remote,
            cache,
            runner,
            ids,
        }
    }

    /// Materialize the requested gauge version and return the directory
    /// the caller must put on the search path.
    pub fn acquire(&self, spec: &VersionSpec) -> Result<Installation, InstallError> {
        match spec {
            VersionSpec::FromSource => self.build_from_source(),
            VersionSpec::Exact(version) => {
                let target = version::download_target(
                    version,
                    self.config.platform,
                    self.config.download_arch,
                )?;
                self.fetch_release(target)
            }
            VersionSpec::Latest => {
                debug!("no version selected, resolving the latest release");
                let release = self.remote.latest_release(LATEST_RELEASE_URL)?;
                let target = version::target_from_release(
                    &release,
                    self.config.platform,
                    self.config.download_arch,
                )?;
                self.fetch_release(target)
            }
        }
    }

    fn fetch_release(&self, target: DownloadTarget) -> Result<Installation, InstallError> {
        if let Some(dir) = self.cache.find(TOOL_NAME, &target.version) {
            debug!(
                "gauge {} found in tool cache at {}",
                target.version,
                dir.display()
            );
            return Ok(Installation {
                dir,
                version: target.version,
            });
        }

        info!("downloading gauge {} from {}", target.version, target.url);
        fs::create_dir_all(&self.config.temp_root)?;
        let archive = self
            .config
            .temp_root
            .join(format!("download_{}.zip", self.ids.next_id()));
        self.remote.download(&target.url, &archive)?;

        let scratch = self.scratch_dir();
        extract::extract_zip(&archive, &scratch)?;
        debug!("gauge extracted to {}", scratch.display());

        let dir = self.cache.store(&scratch, TOOL_NAME, &target.version)?;
        Ok(Installation {
            dir,
            version: target.version,
        })
    }

    fn build_from_source(&self) -> Result<Installation, InstallError> {
        info!("building gauge from source");
        let checkout = self.scratch_dir().join(TOOL_NAME);
        fs::create_dir_all(&checkout)?;
        let checkout_arg = checkout.to_string_lossy();

        self.runner
            .run("git", &["clone", GAUGE_REPO_URL, &*checkout_arg], None)
            .map_err(InstallError::SourceBuild)?;

        let make = Path::new("build").join("make.go");
        let make_arg = make.to_string_lossy();
        self.runner
            .run("go", &["run", &*make_arg], Some(&checkout))
            .map_err(InstallError::SourceBuild)?;

        let built = checkout.join("bin").join(format!(
            "{}_{}",
            self.config.platform.tag(),
            self.config.exec_arch.tag()
        ));
        let dir = self.cache.store(&built, TOOL_NAME, SOURCE_MARKER)?;
        Ok(Installation {
            dir,
            version: SOURCE_MARKER.to_string(),
        })
    }

    /// Install each plugin via `gauge install <name>`, attempting every
    /// plugin before reporting the ones that failed.
    pub fn install_plugins(&self, plugins: &[String]) -> Result<(), InstallError> {
        let mut failed = Vec::new();
        for plugin in plugins {
            info!("installing gauge plugin {plugin}");
            if let Err(e) = self.runner.run(TOOL_NAME, &["install", plugin], None) {
                error!("failed to install plugin {plugin}: {e}");
                failed.push(plugin.clone());
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(InstallError::PluginInstall { failed })
        }
    }

    fn scratch_dir(&self) -> PathBuf {
        self.config
            .temp_root
            .join(format!("temp_{}", self.ids.next_id()))
    }
}
