//! All-or-nothing file output

use crate::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Write `bytes` to `path` through `temp_path`.
///
/// The temp file is removed on any failure, so `path` either holds the
/// complete content or is left as it was.
pub(crate) fn write_atomic(path: &Path, temp_path: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic_with(path, temp_path, |file| file.write_all(bytes))
}

fn write_atomic_with<F>(path: &Path, temp_path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let result = fs::File::create(temp_path)
        .and_then(|mut file| {
            write(&mut file)?;
            file.flush()
        })
        .and_then(|()| fs::rename(temp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(temp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmError;

    #[test]
    fn test_writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let temp = dir.path().join("out.bin.tmp");

        write_atomic(&path, &temp, b"payload").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"payload");
        assert!(!temp.exists());
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let temp = dir.path().join("out.bin.tmp");

        let result = write_atomic_with(&path, &temp, |file| {
            file.write_all(b"half")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        assert!(matches!(result, Err(AmError::Io(_))));
        assert!(!temp.exists());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_rename_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let temp = dir.path().join("taken.tmp");

        assert!(write_atomic(&path, &temp, b"payload").is_err());
        assert!(!temp.exists());
        assert!(path.join("keep").exists());
    }
}
