//! Typed failures of a workflow execution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why [`crate::materialize::execute`] did not produce a project file.
///
/// A declined overwrite is not an error; it is reported as
/// [`crate::materialize::ExecuteOutcome::Cancelled`].
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Missing or invalid user input. Raised before any filesystem mutation.
    #[error("{0}")]
    Validation(String),

    /// Directory creation or template copy failed.
    ///
    /// The OS message is the error's source; render with `{:#}` to include it.
    #[error("{action} {}", path.display())]
    Filesystem {
        action: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn filesystem(
        action: impl Into<String>,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::Filesystem {
            action: action.into(),
            path: path.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
