//! Moving upload sources into their blob location.
//!
//! Renaming is atomic when source and destination share a filesystem. When
//! it fails the bytes are stream-copied instead; a crash during the copy can
//! leave a truncated blob behind, which the size check on download rejects.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{BlobError, BlobResult};

/// File mode for newly created blob files.
#[cfg(unix)]
const BLOB_FILE_MODE: u32 = 0o600;

/// Rename `source` onto `dest`, falling back to [`copy_into`] if the rename
/// fails.
pub fn rename_or_copy(source: &Path, dest: &Path) -> BlobResult<()> {
    place_with(source, dest, |from, to| fs::rename(from, to))
}

/// Try `rename` first, then stream-copy.
///
/// The rename error itself is never reported: any failure the copy cannot
/// get past surfaces from the copy.
pub(crate) fn place_with<F>(source: &Path, dest: &Path, rename: F) -> BlobResult<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(source, dest) {
        Ok(()) => {
            debug!(source = %source.display(), dest = %dest.display(), "blob renamed into place");
            Ok(())
        }
        Err(e) => {
            debug!(
                source = %source.display(),
                dest = %dest.display(),
                error = %e,
                "rename failed, copying blob"
            );
            copy_into(source, dest)
        }
    }
}

/// Stream-copy `source` into `dest`, replacing any existing content.
///
/// The source file is left in place.
pub fn copy_into(source: &Path, dest: &Path) -> BlobResult<()> {
    let mut src = File::open(source).map_err(|e| BlobError::OpenSource {
        path: source.to_path_buf(),
        source: e,
    })?;

    let file = create_blob_file(dest).map_err(|e| BlobError::OpenForWrite {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let write_err = |e: io::Error| BlobError::Write {
        path: dest.to_path_buf(),
        source: e,
    };
    let mut writer = BufWriter::new(file);
    let copied = io::copy(&mut src, &mut writer).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    debug!(dest = %dest.display(), bytes = copied, "blob copied into place");
    Ok(())
}

fn create_blob_file(path: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(BLOB_FILE_MODE);
    }
    opts.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cross_device(_: &Path, _: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "invalid cross-device link"))
    }

    #[test]
    fn rename_moves_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        fs::write(&src, b"hello").unwrap();

        rename_or_copy(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
        assert!(!src.exists());
    }

    #[test]
    fn failed_rename_falls_back_to_copy() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        fs::write(&src, b"hello").unwrap();

        place_with(&src, &dest, cross_device).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
        // The copy path does not consume the source.
        assert!(src.exists());
    }

    #[test]
    fn copy_truncates_longer_existing_blob() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        fs::write(&dest, b"a much longer previous payload").unwrap();
        fs::write(&src, b"short").unwrap();

        copy_into(&src, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"short");
    }

    #[test]
    fn copy_reports_missing_source() {
        let dir = tempdir().unwrap();
        let err = place_with(
            &dir.path().join("missing"),
            &dir.path().join("dest"),
            cross_device,
        )
        .unwrap_err();
        assert!(matches!(err, BlobError::OpenSource { .. }));
    }

    #[test]
    fn copy_reports_unwritable_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::write(&src, b"x").unwrap();

        let err = copy_into(&src, &dir.path().join("no-such-dir").join("dest")).unwrap_err();
        assert!(matches!(err, BlobError::OpenForWrite { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn copied_blob_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        fs::write(&src, b"x").unwrap();

        copy_into(&src, &dest).unwrap();
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
