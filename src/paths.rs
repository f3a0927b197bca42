//! Search-path registration for the rest of the job.

use std::env::{self, JoinPathsError};
use std::ffi::{OsStr, OsString};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Build a PATH value with `dir` prepended to `current`.
pub fn prepend(dir: &Path, current: Option<&OsStr>) -> Result<OsString, JoinPathsError> {
    let mut entries: Vec<PathBuf> = vec![dir.to_path_buf()];
    if let Some(current) = current {
        entries.extend(env::split_paths(current));
    }
    env::join_paths(entries)
}

/// Make `dir` visible to later pipeline steps and to this process.
///
/// Runners pick up additions for later steps from the file named by
/// GITHUB_PATH; this process's own PATH is updated too so the plugin
/// installs that follow can find the gauge binary.
pub fn expose(dir: &Path) -> Result<()> {
    debug!("adding {} to the path", dir.display());
    if let Some(path_file) = env::var_os("GITHUB_PATH") {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path_file)
            .with_context(|| {
                format!("failed to open {}", PathBuf::from(&path_file).display())
            })?;
        writeln!(file, "{}", dir.display())?;
    }

    let updated = prepend(dir, env::var_os("PATH").as_deref())
        .context("tool directory cannot be joined into PATH")?;
    // Safety: still single-threaded here; nothing reads the environment
    // concurrently.
    unsafe {
        env::set_var("PATH", &updated);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_ahead_of_existing_entries() {
        let current =
            env::join_paths([PathBuf::from("/usr/bin"), PathBuf::from("/bin")]).unwrap();
        let updated = prepend(Path::new("/opt/gauge"), Some(current.as_os_str())).unwrap();
        let entries: Vec<PathBuf> = env::split_paths(&updated).collect();
        assert_eq!(entries[0], PathBuf::from("/opt/gauge"));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn works_without_an_existing_path() {
        let updated = prepend(Path::new("/opt/gauge"), None).unwrap();
        let entries: Vec<PathBuf> = env::split_paths(&updated).collect();
        assert_eq!(entries, vec![PathBuf::from("/opt/gauge")]);
    }
}
