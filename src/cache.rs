//! Versioned tool cache: `<root>/<tool>/<version>` directories that
//! survive the job and are reused by later invocations on the same runner.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read/write access to the runner's tool cache. This system only ever
/// looks entries up and adds new ones; it never enumerates or evicts.
pub trait ToolCache {
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf>;

    /// Copy `source` into the cache under (tool, version) and return the
    /// cached directory.
    fn store(&self, source: &Path, tool: &str, version: &str) -> io::Result<PathBuf>;
}

pub struct DirCache {
    root: PathBuf,
}

impl DirCache {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn entry(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version)
    }
}

impl ToolCache for DirCache {
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry(tool, version);
        dir.is_dir().then_some(dir)
    }

    fn store(&self, source: &Path, tool: &str, version: &str) -> io::Result<PathBuf> {
        let dest = self.entry(tool, version);
        copy_dir(source, &dest)?;
        Ok(dest)
    }
}

/// Copy directory recursively
fn copy_dir(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_misses_on_empty_cache() {
        let root = TempDir::new().unwrap();
        let cache = DirCache::new(root.path().to_path_buf());
        assert!(cache.find("gauge", "1.2.3").is_none());
    }

    #[test]
    fn store_then_find_returns_same_directory() {
        let root = TempDir::new().unwrap();
        let cache = DirCache::new(root.path().to_path_buf());

        let staging = TempDir::new().unwrap();
        fs::create_dir(staging.path().join("plugins")).unwrap();
        fs::write(staging.path().join("gauge"), b"binary").unwrap();
        fs::write(staging.path().join("plugins").join("notice"), b"x").unwrap();

        let cached = cache.store(staging.path(), "gauge", "1.2.3").unwrap();
        assert_eq!(cache.find("gauge", "1.2.3"), Some(cached.clone()));
        assert_eq!(fs::read(cached.join("gauge")).unwrap(), b"binary");
        assert!(cached.join("plugins").join("notice").is_file());
    }

    #[test]
    fn versions_are_kept_apart() {
        let root = TempDir::new().unwrap();
        let cache = DirCache::new(root.path().to_path_buf());

        let staging = TempDir::new().unwrap();
        fs::write(staging.path().join("gauge"), b"binary").unwrap();
        cache.store(staging.path(), "gauge", "1.0.0").unwrap();

        assert!(cache.find("gauge", "1.0.0").is_some());
        assert!(cache.find("gauge", "2.0.0").is_none());
    }
}
