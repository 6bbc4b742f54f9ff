//! Validation of a [`WorkflowRequest`] before any filesystem work.

use std::path::Path;

use super::path::split_subpath;
use super::types::{Category, WorkflowRequest};
use crate::error::WorkflowError;

/// Request fields after validation, borrowed from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest<'a> {
    pub base_directory: &'a Path,
    pub category: Category,
    pub project_name: &'a str,
    pub subpath: Vec<&'a str>,
    pub template_filename: &'a str,
    pub output_filename: &'a str,
}

/// Check every required field and reject names that would leave their folder.
///
/// Runs before any I/O; a failure here guarantees nothing was created.
pub fn validate_request<'a>(
    request: &'a WorkflowRequest,
    base_directory: Option<&'a Path>,
) -> Result<ValidatedRequest<'a>, WorkflowError> {
    let base_directory = base_directory.ok_or_else(|| {
        WorkflowError::validation(format!(
            "no base directory selected for profile {}",
            request.profile
        ))
    })?;
    let project_name = required_name("project name", &request.project_name)?;
    let output_filename = required_name("output filename", &request.output_filename)?;
    let template_filename = match request.template_filename.as_deref() {
        Some(name) => required_name("template", name)?,
        None => return Err(WorkflowError::validation("no template selected")),
    };

    let subpath = match request.subpath.as_deref() {
        Some(raw) => split_subpath(raw),
        None => Vec::new(),
    };
    if let Some(segment) = subpath.iter().find(|s| is_dot_segment(s)) {
        return Err(WorkflowError::validation(format!(
            "subpath segment {segment:?} is not allowed"
        )));
    }

    Ok(ValidatedRequest {
        base_directory,
        category: request.category,
        project_name,
        subpath,
        template_filename,
        output_filename,
    })
}

/// Trimmed, non-blank single path component.
fn required_name<'a>(field: &str, value: &'a str) -> Result<&'a str, WorkflowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::validation(format!("{field} is required")));
    }
    if trimmed.contains(['/', '\\']) || is_dot_segment(trimmed) {
        return Err(WorkflowError::validation(format!(
            "{field} {trimmed:?} must be a plain name"
        )));
    }
    Ok(trimmed)
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}
