use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::version::RELEASES_PAGE;

/// A fatal acquisition failure or a trailing plugin-install failure.
///
/// Everything except [`InstallError::PluginInstall`] aborts the invocation
/// before any plugin is attempted.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("no valid download found for version '{version}'. Check {RELEASES_PAGE} for a list of valid releases")]
    InvalidVersion { version: String },

    #[error("release metadata from {url} has no usable tag_name field")]
    MalformedReleaseMetadata { url: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<reqwest::Error>,
    },

    #[error("request to {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to extract {0}: it doesn't exist")]
    NotAFile(PathBuf),

    #[error("failed to extract {0}: it is a directory")]
    IsADirectory(PathBuf),

    #[error("failed to extract {0}: it is not a regular file")]
    UnknownFileType(PathBuf),

    #[error("failed to extract archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("building gauge from source failed: {0}")]
    SourceBuild(#[source] CommandError),

    #[error("failed to install plugins: {}", .failed.join(", "))]
    PluginInstall { failed: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure of an external command (git, go, gauge).
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}
