//! Deterministic destination path construction.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::calendar::date_segments;
use super::types::Category;

/// Split a user-supplied subpath on `/` or `\`, dropping empty segments.
///
/// Segments are trimmed of surrounding whitespace, so leading, trailing,
/// doubled and blank-only separators all vanish:
/// `"/Kitchen// /Cabinet /"` yields `["Kitchen", "Cabinet"]`.
pub fn split_subpath(raw: &str) -> Vec<&str> {
    raw.split(['/', '\\'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// `base / year / category / month / project [/ subpath...]`.
pub fn destination_directory(
    base: &Path,
    date: NaiveDate,
    category: Category,
    project_name: &str,
    subpath: &[&str],
) -> PathBuf {
    let (year, month) = date_segments(date);
    let mut dir = base
        .join(year)
        .join(category.folder_name())
        .join(month)
        .join(project_name);
    for segment in subpath {
        dir.push(segment);
    }
    dir
}

/// Output filename with the profile's extension appended verbatim.
pub fn output_file_name(output_filename: &str, output_extension: &str) -> String {
    format!("{output_filename}{output_extension}")
}
