//! Per-profile directory settings stored in `config.json`.
//!
//! Two on-disk shapes are accepted:
//!
//! - nested: `{ "<profile>": { "base_path": "...", "custom_template_path": "..." } }`
//! - flat: `{ "base_path": "..." }`, written by the single-profile release and
//!   read as the [`LEGACY_PROFILE`] entry.
//!
//! Saves always write the nested shape and rewrite the whole file with a plain
//! write. A crash mid-write can leave a truncated file, which the next load
//! treats as empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Profile that receives the `base_path` of a flat document.
pub const LEGACY_PROFILE: &str = "aspire";

/// Persisted settings of one profile.
///
/// Empty strings on disk mean "not selected" and load as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    #[serde(serialize_with = "path_or_empty")]
    pub base_path: Option<PathBuf>,

    #[serde(serialize_with = "path_or_empty")]
    pub custom_template_path: Option<PathBuf>,

    /// Only set for profiles declared in the file rather than built in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_extension: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_extension: Option<String>,
}

impl ProfileSettings {
    fn normalized(mut self) -> Self {
        self.base_path = self.base_path.filter(|p| !p.as_os_str().is_empty());
        self.custom_template_path = self
            .custom_template_path
            .filter(|p| !p.as_os_str().is_empty());
        self.template_extension = self.template_extension.filter(|e| !e.trim().is_empty());
        self.output_extension = self.output_extension.filter(|e| !e.trim().is_empty());
        self
    }
}

/// Whole configuration file, keyed by lowercase profile name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    pub profiles: BTreeMap<String, ProfileSettings>,
}

impl ConfigDocument {
    pub fn get(&self, profile: &str) -> Option<&ProfileSettings> {
        self.profiles.get(&profile.to_lowercase())
    }

    /// Entry for `profile`, created empty on first use.
    pub fn entry_mut(&mut self, profile: &str) -> &mut ProfileSettings {
        self.profiles.entry(profile.to_lowercase()).or_default()
    }
}

/// Load the configuration document.
///
/// Never fails: a missing file yields an empty document, and an unreadable or
/// malformed file is logged and also yields an empty document.
pub fn load_config(path: &Path) -> ConfigDocument {
    if !path.exists() {
        debug!(path = %path.display(), "config file absent, using defaults");
        return ConfigDocument::default();
    }
    match read_document(path) {
        Ok(doc) => doc,
        Err(err) => {
            let error = format!("{err:#}");
            warn!(path = %path.display(), %error, "ignoring unreadable config");
            ConfigDocument::default()
        }
    }
}

/// Serialize the full document and overwrite `path`.
pub fn save_config(path: &Path, doc: &ConfigDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut buf = serde_json::to_string_pretty(doc).context("serialize config json")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write config {}", path.display()))?;
    debug!(path = %path.display(), profiles = doc.profiles.len(), "config saved");
    Ok(())
}

fn read_document(path: &Path) -> Result<ConfigDocument> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse config {}", path.display()))?;
    let Value::Object(map) = value else {
        anyhow::bail!("config {} must be a JSON object", path.display());
    };
    Ok(document_from_map(map))
}

fn document_from_map(map: Map<String, Value>) -> ConfigDocument {
    let mut doc = ConfigDocument::default();

    if let Some(Value::String(base)) = map.get("base_path") {
        doc.profiles.insert(
            LEGACY_PROFILE.to_string(),
            ProfileSettings {
                base_path: Some(PathBuf::from(base)),
                ..ProfileSettings::default()
            }
            .normalized(),
        );
        return doc;
    }

    for (name, value) in map {
        if !value.is_object() {
            warn!(profile = %name, "skipping config entry that is not an object");
            continue;
        }
        match serde_json::from_value::<ProfileSettings>(value) {
            Ok(settings) => {
                doc.profiles
                    .insert(name.to_lowercase(), settings.normalized());
            }
            Err(err) => warn!(profile = %name, error = %err, "skipping malformed config entry"),
        }
    }
    doc
}

fn path_or_empty<S: Serializer>(path: &Option<PathBuf>, serializer: S) -> Result<S::Ok, S::Error> {
    match path {
        Some(path) => path.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}
