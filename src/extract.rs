use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::InstallError;

/// Extract a downloaded gauge zip into `dest`.
///
/// The archive path must be a regular file on disk; the three failure
/// kinds are kept distinct so the user can tell a missing download from a
/// mixed-up path.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<(), InstallError> {
    debug!("extracting {} to {}", archive.display(), dest.display());

    let metadata = match fs::metadata(archive) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InstallError::NotAFile(archive.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    if metadata.is_dir() {
        return Err(InstallError::IsADirectory(archive.to_path_buf()));
    }
    if !metadata.is_file() {
        return Err(InstallError::UnknownFileType(archive.to_path_buf()));
    }

    fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| InstallError::Archive {
        path: archive.to_path_buf(),
        source: e,
    })?;
    zip.extract(dest).map_err(|e| InstallError::Archive {
        path: archive.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn missing_archive_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let err = extract_zip(&dir.path().join("gone.zip"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, InstallError::NotAFile(_)));
    }

    #[test]
    fn directory_archive_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = extract_zip(dir.path(), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, InstallError::IsADirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn socket_archive_is_an_unknown_file_type() {
        use std::os::unix::net::UnixListener;

        let dir = TempDir::new().unwrap();
        let socket = dir.path().join("gauge.sock");
        let _listener = UnixListener::bind(&socket).unwrap();

        let err = extract_zip(&socket, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, InstallError::UnknownFileType(_)));
    }

    #[test]
    fn garbage_file_is_an_archive_error() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip").unwrap();
        let err = extract_zip(&archive, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, InstallError::Archive { .. }));
    }

    #[test]
    fn extracts_a_real_zip() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("gauge.zip");

        let file = File::create(&archive).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("gauge", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"binary").unwrap();
        writer.finish().unwrap();

        let out = dir.path().join("out");
        extract_zip(&archive, &out).unwrap();
        assert_eq!(fs::read(out.join("gauge")).unwrap(), b"binary");
    }
}
