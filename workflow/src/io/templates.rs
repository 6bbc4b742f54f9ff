//! Template discovery inside a profile's template directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// Result of scanning a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateListing {
    /// Matching filenames in enumeration order (no defined sort).
    Available(Vec<String>),
    /// The directory does not exist; there is nothing to list.
    MissingDirectory(PathBuf),
}

impl TemplateListing {
    pub fn names(&self) -> &[String] {
        match self {
            TemplateListing::Available(names) => names,
            TemplateListing::MissingDirectory(_) => &[],
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, TemplateListing::MissingDirectory(_))
    }
}

/// List regular files directly inside `directory` whose name ends with `extension`.
///
/// Re-reads the directory on every call. A missing directory is reported as
/// [`TemplateListing::MissingDirectory`], not as an error.
#[instrument(skip_all, fields(directory = %directory.display(), extension))]
pub fn list_templates(directory: &Path, extension: &str) -> Result<TemplateListing> {
    if !directory.is_dir() {
        debug!("template directory not found");
        return Ok(TemplateListing::MissingDirectory(directory.to_path_buf()));
    }
    let entries = fs::read_dir(directory)
        .with_context(|| format!("read directory {}", directory.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", directory.display()))?;
        // Follow symlinks so linked templates are listed too.
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %entry.path().display(), "skipping non-UTF-8 filename");
            continue;
        };
        if name.ends_with(extension) {
            names.push(name);
        }
    }
    debug!(count = names.len(), "templates listed");
    Ok(TemplateListing::Available(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"template").expect("write file");
    }

    #[test]
    fn lists_only_matching_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path();
        touch(&dir.join("Starter.crvt3d"));
        touch(&dir.join("Door.crvt3d"));
        touch(&dir.join("notes.txt"));
        touch(&dir.join("Old.crv3d"));
        fs::create_dir(dir.join("Nested.crvt3d")).expect("mkdir");

        let listing = list_templates(dir, ".crvt3d").expect("list");
        let mut names = listing.names().to_vec();
        names.sort();
        assert_eq!(names, vec!["Door.crvt3d", "Starter.crvt3d"]);
        assert!(!listing.is_missing());
    }

    #[test]
    fn empty_directory_is_available_but_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let listing = list_templates(temp.path(), ".skp").expect("list");
        assert_eq!(listing, TemplateListing::Available(Vec::new()));
    }

    #[test]
    fn missing_directory_is_signalled_not_raised() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("Modelos");
        let listing = list_templates(&missing, ".skp").expect("list");
        assert_eq!(listing, TemplateListing::MissingDirectory(missing));
        assert!(listing.names().is_empty());
    }

    #[test]
    fn listing_reflects_changes_between_calls() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path();
        assert!(list_templates(dir, ".skp").expect("list").names().is_empty());

        touch(&dir.join("Box.skp"));
        assert_eq!(
            list_templates(dir, ".skp").expect("list").names(),
            ["Box.skp".to_string()]
        );
    }
}
