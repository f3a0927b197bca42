use std::fs::File;
use std::io;
use std::path::Path;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::InstallError;
use crate::version::Release;

/// Network operations the installer needs. Behind a trait so the
/// acquisition flow can be exercised without a network.
pub trait Remote {
    /// Fetch the latest-release metadata document.
    fn latest_release(&self, url: &str) -> Result<Release, InstallError>;

    /// Download `url` to the file at `dest`.
    fn download(&self, url: &str, dest: &Path) -> Result<(), InstallError>;
}

pub struct HttpRemote {
    client: Client,
}

impl HttpRemote {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent("setup-gauge").build()?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, InstallError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| InstallError::Network {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        if !response.status().is_success() {
            return Err(InstallError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }
        Ok(response)
    }
}

impl Remote for HttpRemote {
    fn latest_release(&self, url: &str) -> Result<Release, InstallError> {
        debug!("fetching release metadata from {url}");
        self.get(url)?
            .json()
            .map_err(|_| InstallError::MalformedReleaseMetadata {
                url: url.to_string(),
            })
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), InstallError> {
        debug!("downloading {url} to {}", dest.display());
        let mut response = self.get(url)?;
        let mut file = File::create(dest)?;
        io::copy(&mut response, &mut file)?;
        Ok(())
    }
}
