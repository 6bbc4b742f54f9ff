//! Orchestration for a single project materialization.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::core::path::{destination_directory, output_file_name};
use crate::core::request::validate_request;
use crate::core::types::WorkflowRequest;
use crate::error::WorkflowError;
use crate::io::confirm::Confirm;
use crate::io::fs_ops::{copy_with_metadata, ensure_directory, is_same_file};
use crate::io::opener::Opener;
use crate::profiles::Profile;

/// Whether the OS opener accepted the created file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenStatus {
    Opened,
    /// The copy stands; only launching the application failed.
    Failed(String),
}

/// Result of a workflow that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Template copied to `file` inside `directory`.
    Created {
        directory: PathBuf,
        file: PathBuf,
        open: OpenStatus,
    },
    /// `file` already existed and the user declined to overwrite it.
    Cancelled { file: PathBuf },
}

/// Create the dated project folder, copy the template into it and open it.
///
/// Validation happens before any I/O. A declined overwrite returns
/// [`ExecuteOutcome::Cancelled`] without touching the existing file.
#[instrument(skip_all, fields(profile = %profile.spec.name, project = %request.project_name))]
pub fn execute<C: Confirm + ?Sized, O: Opener + ?Sized>(
    request: &WorkflowRequest,
    profile: &Profile,
    today: NaiveDate,
    confirm: &C,
    opener: &O,
) -> Result<ExecuteOutcome, WorkflowError> {
    let validated = validate_request(request, profile.base_directory.as_deref())?;
    let template_dir = profile.template_directory().ok_or_else(|| {
        WorkflowError::validation(format!(
            "no template directory for profile {}",
            profile.spec.name
        ))
    })?;

    let directory = destination_directory(
        validated.base_directory,
        today,
        validated.category,
        validated.project_name,
        &validated.subpath,
    );
    ensure_directory(&directory)?;
    debug!(directory = %directory.display(), "destination directory ready");

    let source = template_dir.join(validated.template_filename);
    let file = directory.join(output_file_name(
        validated.output_filename,
        &profile.spec.output_extension,
    ));

    if file.exists() && is_same_file(&source, &file) {
        return Err(WorkflowError::validation(format!(
            "template {} is the output file itself",
            source.display()
        )));
    }
    if file.exists() && !confirm.confirm_overwrite(&file) {
        info!(file = %file.display(), "overwrite declined");
        return Ok(ExecuteOutcome::Cancelled { file });
    }

    copy_with_metadata(&source, &file)?;
    info!(file = %file.display(), template = %source.display(), "project file created");

    let open = match opener.open(&file) {
        Ok(()) => OpenStatus::Opened,
        Err(err) => {
            let message = format!("{err:#}");
            warn!(file = %file.display(), error = %message, "could not open project file");
            OpenStatus::Failed(message)
        }
    };

    Ok(ExecuteOutcome::Created {
        directory,
        file,
        open,
    })
}
