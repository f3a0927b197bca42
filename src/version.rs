use serde::Deserialize;

use crate::error::InstallError;
use crate::platform::{DownloadArch, Platform};

pub const GAUGE_REPO_URL: &str = "https://github.com/getgauge/gauge";
pub const LATEST_RELEASE_URL: &str = "https://api.github.com/repos/getgauge/gauge/releases/latest";
pub const RELEASES_PAGE: &str = "https://github.com/getgauge/gauge/releases";

/// Version input that requests a source build; doubles as the
/// pseudo-version source builds are cached under.
pub const SOURCE_MARKER: &str = "master";

/// What the user asked for, parsed from the raw version input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// No version given: resolve the latest published release.
    Latest,
    /// An explicit version string, validated at resolution time.
    Exact(String),
    /// The literal `master`: clone and build gauge from source.
    FromSource,
}

impl VersionSpec {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == SOURCE_MARKER {
            VersionSpec::FromSource
        } else if trimmed.is_empty() {
            VersionSpec::Latest
        } else {
            VersionSpec::Exact(trimmed.to_string())
        }
    }
}

/// A concrete release artifact to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub version: String,
}

/// The slice of the release metadata document we care about.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: Option<String>,
}

/// Resolve an explicit version to its release artifact URL.
pub fn download_target(
    version: &str,
    platform: Platform,
    arch: DownloadArch,
) -> Result<DownloadTarget, InstallError> {
    if semver::Version::parse(version).is_err() {
        return Err(InstallError::InvalidVersion {
            version: version.to_string(),
        });
    }
    Ok(DownloadTarget {
        url: artifact_url(version, platform, arch),
        version: version.to_string(),
    })
}

/// Resolve the latest release metadata to its artifact URL.
///
/// Release tags carry a `v` prefix (`v1.2.3`); anything else is treated as
/// malformed metadata rather than silently defaulted.
pub fn target_from_release(
    release: &Release,
    platform: Platform,
    arch: DownloadArch,
) -> Result<DownloadTarget, InstallError> {
    let version = release
        .tag_name
        .as_deref()
        .and_then(|tag| tag.strip_prefix('v'))
        .filter(|version| !version.is_empty())
        .ok_or_else(|| InstallError::MalformedReleaseMetadata {
            url: LATEST_RELEASE_URL.to_string(),
        })?;
    Ok(DownloadTarget {
        url: artifact_url(version, platform, arch),
        version: version.to_string(),
    })
}

fn artifact_url(version: &str, platform: Platform, arch: DownloadArch) -> String {
    format!(
        "{GAUGE_REPO_URL}/releases/download/v{version}/gauge-{version}-{}.{}.zip",
        platform.tag(),
        arch.tag()
    )
}
