//! Shared deterministic types for the workflow.

use serde::{Deserialize, Serialize};

/// Automatic template folder name, relative to a profile's base directory.
pub const AUTOMATIC_TEMPLATE_DIR: &str = "Modelos";

/// Coarse project classification, used as a path segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Client,
    Other,
}

impl Category {
    /// Folder name placed under the year directory.
    pub fn folder_name(self) -> &'static str {
        match self {
            Category::Client => "Clients",
            Category::Other => "Other",
        }
    }
}

/// Static description of a target application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSpec {
    /// Lowercase identity, also the key in the configuration document.
    pub name: String,
    /// Human-readable application name.
    pub label: String,
    /// Suffix of starter files listed in the template directory.
    pub template_extension: String,
    /// Suffix appended to the output filename.
    pub output_extension: String,
}

impl ProfileSpec {
    pub fn new(name: &str, label: &str, template_extension: &str, output_extension: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            label: label.to_string(),
            template_extension: template_extension.to_string(),
            output_extension: output_extension.to_string(),
        }
    }
}

/// One user action: everything needed to materialize a project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRequest {
    pub profile: String,
    pub category: Category,
    pub project_name: String,
    /// Optional nested folders below the project folder, e.g. `Kitchen/Cabinet`.
    pub subpath: Option<String>,
    /// Bare filename inside the template directory.
    pub template_filename: Option<String>,
    /// Output filename without extension.
    pub output_filename: String,
}
