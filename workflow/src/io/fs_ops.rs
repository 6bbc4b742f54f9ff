//! Directory creation and template copy with typed failures.

use std::fs::{self, File, FileTimes, OpenOptions};
use std::path::Path;

use tracing::debug;

use crate::error::WorkflowError;

/// True when both paths exist and resolve to the same file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create `dir` and every missing ancestor. Succeeds if it already exists.
pub fn ensure_directory(dir: &Path) -> Result<(), WorkflowError> {
    fs::create_dir_all(dir).map_err(|err| WorkflowError::filesystem("create directory", dir, err))
}

/// Copy bytes, permissions and access/modification times from `source` to `dest`.
///
/// Overwrites `dest` if it exists. A failure part-way leaves `dest` as the
/// copy left it.
pub fn copy_with_metadata(source: &Path, dest: &Path) -> Result<u64, WorkflowError> {
    let bytes = fs::copy(source, dest).map_err(|err| {
        WorkflowError::filesystem(format!("copy {} to", source.display()), dest, err)
    })?;
    let metadata =
        fs::metadata(source).map_err(|err| WorkflowError::filesystem("read metadata", source, err))?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    // Read-only templates produce a read-only copy; fall back to a read handle.
    let file = OpenOptions::new()
        .write(true)
        .open(dest)
        .or_else(|_| File::open(dest))
        .map_err(|err| WorkflowError::filesystem("open copy", dest, err))?;
    file.set_times(times)
        .map_err(|err| WorkflowError::filesystem("preserve timestamps", dest, err))?;

    debug!(source = %source.display(), dest = %dest.display(), bytes, "template copied");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn ensure_directory_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("2024").join("Clients").join("March");
        ensure_directory(&dir).expect("first");
        ensure_directory(&dir).expect("second");
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_directory_fails_when_ancestor_is_a_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let blocker = temp.path().join("2024");
        fs::write(&blocker, b"not a dir").expect("write");

        let err = ensure_directory(&blocker.join("Clients")).unwrap_err();
        assert!(matches!(err, WorkflowError::Filesystem { .. }));
    }

    #[test]
    fn copy_preserves_bytes_and_modified_time() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("Starter.crvt3d");
        let dest = temp.path().join("panel.crv3d");
        fs::write(&source, b"starter bytes").expect("write");

        let past = SystemTime::now() - Duration::from_secs(86_400 * 30);
        File::options()
            .write(true)
            .open(&source)
            .expect("open")
            .set_modified(past)
            .expect("set mtime");

        let bytes = copy_with_metadata(&source, &dest).expect("copy");
        assert_eq!(bytes, 13);
        assert_eq!(fs::read(&dest).expect("read"), b"starter bytes");

        let copied = fs::metadata(&dest).expect("meta").modified().expect("mtime");
        let original = fs::metadata(&source).expect("meta").modified().expect("mtime");
        assert_eq!(copied, original);
    }

    #[test]
    fn copy_missing_source_is_filesystem_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = copy_with_metadata(&temp.path().join("missing"), &temp.path().join("out"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("copy "));
        assert!(msg.ends_with(&format!("missing to {}", temp.path().join("out").display())));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn copy_onto_directory_names_destination() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("Starter.crvt3d");
        let dest = temp.path().join("panel.crv3d");
        fs::write(&source, b"starter").expect("write");
        fs::create_dir(&dest).expect("mkdir");

        let err = copy_with_metadata(&source, &dest).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("copy {} to {}", source.display(), dest.display())
        );
    }

    #[test]
    fn same_file_detection_follows_path_spelling() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("panel.skp");
        fs::write(&file, b"model").expect("write");
        let other = temp.path().join("other.skp");
        fs::write(&other, b"model").expect("write");

        assert!(is_same_file(&file, &temp.path().join(".").join("panel.skp")));
        assert!(!is_same_file(&file, &other));
        assert!(!is_same_file(&file, &temp.path().join("missing.skp")));
    }
}
