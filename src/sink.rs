//! Filesystem primitives for writing the output tree.
//!
//! Every output file is regenerated from scratch: a stale file at the target
//! path is removed before the new one is written, and chapter directories are
//! emptied before their pages are emitted. Removing something that is already
//! gone is not an error; any other failure is returned with the path and the
//! operation that failed.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("cannot {action} {path}: {source}")]
pub struct SinkError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl SinkError {
    pub(crate) fn new(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Remove a file, treating "not found" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool, SinkError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed stale file");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SinkError::new("remove", path, e)),
    }
}

/// Replace the file at `path` with `contents`.
pub fn write_file(path: &Path, contents: &str) -> Result<(), SinkError> {
    remove_file_if_exists(path)?;
    fs::write(path, contents).map_err(|e| SinkError::new("write", path, e))
}

/// Replace the file at `path` with an empty one and return a buffered
/// writer for it, for output that is produced incrementally.
pub fn create_file(path: &Path) -> Result<BufWriter<File>, SinkError> {
    remove_file_if_exists(path)?;
    let file = File::create(path).map_err(|e| SinkError::new("create", path, e))?;
    Ok(BufWriter::new(file))
}

/// Create `path` (and parents) if missing. Existing contents are kept.
pub fn ensure_dir(path: &Path) -> Result<(), SinkError> {
    fs::create_dir_all(path).map_err(|e| SinkError::new("create directory", path, e))
}

/// Make `path` an existing, empty directory.
///
/// A missing directory is created; an existing one has every entry removed,
/// subdirectories included.
pub fn prepare_empty_dir(path: &Path) -> Result<(), SinkError> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ensure_dir(path),
        Err(e) => return Err(SinkError::new("read directory", path, e)),
    };

    let mut removed = 0usize;
    for entry in entries {
        let entry = entry.map_err(|e| SinkError::new("read directory", path, e))?;
        let entry_path = entry.path();
        let is_dir = entry
            .file_type()
            .map_err(|e| SinkError::new("inspect", &entry_path, e))?
            .is_dir();
        let result = if is_dir {
            fs::remove_dir_all(&entry_path)
        } else {
            fs::remove_file(&entry_path)
        };
        match result {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SinkError::new("remove", &entry_path, e)),
        }
    }
    tracing::debug!(path = %path.display(), removed, "cleared directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remove_missing_file_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let removed = remove_file_if_exists(&tmp.path().join("nope.html")).unwrap();
        assert!(!removed);
    }

    #[test]
    fn remove_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old.html");
        fs::write(&path, "old").unwrap();
        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn write_file_replaces_longer_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        fs::write(&path, "a much longer previous version").unwrap();
        write_file(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_file_into_missing_directory_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("page.html");
        let err = write_file(&path, "x").unwrap_err();
        assert_eq!(err.action, "write");
        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("page.html"));
    }

    #[test]
    fn create_file_truncates_existing() {
        use std::io::Write;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitemap.xml");
        fs::write(&path, "previous run").unwrap();
        let mut out = create_file(&path).unwrap();
        out.write_all(b"<urlset>").unwrap();
        drop(out);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<urlset>");
    }

    #[test]
    fn prepare_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("chapter-1");
        prepare_empty_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn prepare_clears_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("chapter-1");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("1.html"), "stale").unwrap();
        fs::write(dir.join("nested").join("x.html"), "stale").unwrap();

        prepare_empty_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn prepare_over_a_file_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chapter-1");
        fs::write(&path, "not a directory").unwrap();
        assert!(prepare_empty_dir(&path).is_err());
    }
}
