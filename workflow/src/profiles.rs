//! Profile catalog: built-in applications plus profiles declared in config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use crate::core::types::{AUTOMATIC_TEMPLATE_DIR, ProfileSpec};
use crate::io::config::{ConfigDocument, save_config};

/// Applications known without any configuration.
pub fn builtin_specs() -> Vec<ProfileSpec> {
    vec![
        ProfileSpec::new("aspire", "Vectric Aspire", ".crvt3d", ".crv3d"),
        ProfileSpec::new("sketchup", "SketchUp", ".skp", ".skp"),
    ]
}

/// A profile spec joined with its persisted directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub spec: ProfileSpec,
    pub base_directory: Option<PathBuf>,
    pub template_override: Option<PathBuf>,
}

impl Profile {
    /// Override directory if set, else `base/Modelos`, else `None`.
    pub fn template_directory(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.template_override {
            return Some(dir.clone());
        }
        self.base_directory
            .as_ref()
            .map(|base| base.join(AUTOMATIC_TEMPLATE_DIR))
    }

    pub fn uses_automatic_templates(&self) -> bool {
        self.template_override.is_none()
    }
}

/// All profiles available for a configuration document.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    specs: Vec<ProfileSpec>,
}

impl ProfileCatalog {
    /// Built-ins first, then document entries that declare both extensions.
    ///
    /// A document entry cannot redefine a built-in's extensions.
    pub fn from_document(doc: &ConfigDocument) -> Self {
        let mut specs = builtin_specs();
        for (name, settings) in &doc.profiles {
            if specs.iter().any(|spec| &spec.name == name) {
                continue;
            }
            if let (Some(template_ext), Some(output_ext)) =
                (&settings.template_extension, &settings.output_extension)
            {
                specs.push(ProfileSpec::new(
                    name,
                    name,
                    &normalize_extension(template_ext),
                    &normalize_extension(output_ext),
                ));
            }
        }
        Self { specs }
    }

    pub fn specs(&self) -> &[ProfileSpec] {
        &self.specs
    }

    pub fn spec(&self, name: &str) -> Result<&ProfileSpec> {
        let wanted = name.trim().to_lowercase();
        self.specs
            .iter()
            .find(|spec| spec.name == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = self.specs.iter().map(|s| s.name.as_str()).collect();
                anyhow!("unknown profile {:?} (known: {})", name, known.join(", "))
            })
    }

    /// Join the named spec with its persisted directories.
    pub fn resolve(&self, name: &str, doc: &ConfigDocument) -> Result<Profile> {
        let spec = self.spec(name)?.clone();
        let settings = doc.get(&spec.name).cloned().unwrap_or_default();
        Ok(Profile {
            spec,
            base_directory: settings.base_path,
            template_override: settings.custom_template_path,
        })
    }

    /// Resolve every profile in catalog order.
    pub fn resolve_all(&self, doc: &ConfigDocument) -> Vec<Profile> {
        self.specs
            .iter()
            .map(|spec| {
                let settings = doc.get(&spec.name).cloned().unwrap_or_default();
                Profile {
                    spec: spec.clone(),
                    base_directory: settings.base_path,
                    template_override: settings.custom_template_path,
                }
            })
            .collect()
    }
}

/// Record `dir` as the profile's base directory.
pub fn set_base_directory(
    catalog: &ProfileCatalog,
    doc: &mut ConfigDocument,
    profile: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let name = catalog.spec(profile)?.name.clone();
    let dir = selected_directory(dir)?;
    doc.entry_mut(&name).base_path = Some(dir.clone());
    info!(profile = %name, base = %dir.display(), "base directory selected");
    Ok(dir)
}

/// Record `dir` as the profile's template override directory.
pub fn set_template_directory(
    catalog: &ProfileCatalog,
    doc: &mut ConfigDocument,
    profile: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let name = catalog.spec(profile)?.name.clone();
    let dir = selected_directory(dir)?;
    doc.entry_mut(&name).custom_template_path = Some(dir.clone());
    info!(profile = %name, templates = %dir.display(), "template directory selected");
    Ok(dir)
}

/// Drop the override so templates come from `base/Modelos` again.
pub fn clear_template_directory(
    catalog: &ProfileCatalog,
    doc: &mut ConfigDocument,
    profile: &str,
) -> Result<()> {
    let name = catalog.spec(profile)?.name.clone();
    doc.entry_mut(&name).custom_template_path = None;
    info!(profile = %name, "template directory reset to automatic");
    Ok(())
}

/// Save the document with an entry for every built-in profile.
pub fn persist(path: &Path, doc: &mut ConfigDocument) -> Result<()> {
    for spec in builtin_specs() {
        doc.entry_mut(&spec.name);
    }
    save_config(path, doc)
}

/// A folder picker only yields existing directories; mirror that here.
fn selected_directory(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("{} is not an existing directory", dir.display());
    }
    std::path::absolute(dir).with_context(|| format!("resolve {}", dir.display()))
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::{ProfileSettings, load_config};

    #[test]
    fn builtins_resolve_case_insensitively() {
        let doc = ConfigDocument::default();
        let catalog = ProfileCatalog::from_document(&doc);
        let profile = catalog.resolve("SketchUp", &doc).expect("resolve");
        assert_eq!(profile.spec.name, "sketchup");
        assert_eq!(profile.spec.output_extension, ".skp");
        assert_eq!(profile.base_directory, None);
        assert_eq!(profile.template_directory(), None);
    }

    #[test]
    fn unknown_profile_lists_known_names() {
        let doc = ConfigDocument::default();
        let catalog = ProfileCatalog::from_document(&doc);
        let err = catalog.resolve("rhino", &doc).unwrap_err();
        assert!(err.to_string().contains("aspire, sketchup"));
    }

    #[test]
    fn custom_profile_needs_both_extensions() {
        let mut doc = ConfigDocument::default();
        doc.profiles.insert(
            "fusion".to_string(),
            ProfileSettings {
                template_extension: Some("f3dt".to_string()),
                output_extension: Some(".f3d".to_string()),
                ..ProfileSettings::default()
            },
        );
        doc.profiles.insert(
            "half".to_string(),
            ProfileSettings {
                template_extension: Some(".x".to_string()),
                ..ProfileSettings::default()
            },
        );
        let catalog = ProfileCatalog::from_document(&doc);

        let fusion = catalog.spec("fusion").expect("fusion");
        assert_eq!(fusion.template_extension, ".f3dt");
        assert_eq!(fusion.output_extension, ".f3d");
        assert!(catalog.spec("half").is_err());
    }

    #[test]
    fn builtin_extensions_cannot_be_overridden() {
        let mut doc = ConfigDocument::default();
        doc.profiles.insert(
            "aspire".to_string(),
            ProfileSettings {
                template_extension: Some(".other".to_string()),
                output_extension: Some(".other".to_string()),
                ..ProfileSettings::default()
            },
        );
        let catalog = ProfileCatalog::from_document(&doc);
        assert_eq!(catalog.specs().len(), 2);
        assert_eq!(
            catalog.spec("aspire").expect("aspire").template_extension,
            ".crvt3d"
        );
    }

    #[test]
    fn template_directory_prefers_override() {
        let mut profile = Profile {
            spec: builtin_specs().remove(0),
            base_directory: Some(PathBuf::from("/data")),
            template_override: None,
        };
        assert_eq!(
            profile.template_directory(),
            Some(PathBuf::from("/data/Modelos"))
        );
        assert!(profile.uses_automatic_templates());

        profile.template_override = Some(PathBuf::from("/shared/tpl"));
        assert_eq!(
            profile.template_directory(),
            Some(PathBuf::from("/shared/tpl"))
        );
    }

    #[test]
    fn selections_persist_write_through() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config_path = temp.path().join("config.json");
        let base = temp.path().join("base");
        let tpl = temp.path().join("tpl");
        std::fs::create_dir_all(&base).expect("mkdir base");
        std::fs::create_dir_all(&tpl).expect("mkdir tpl");

        let mut doc = load_config(&config_path);
        let catalog = ProfileCatalog::from_document(&doc);
        set_base_directory(&catalog, &mut doc, "aspire", &base).expect("set base");
        set_template_directory(&catalog, &mut doc, "aspire", &tpl).expect("set tpl");
        persist(&config_path, &mut doc).expect("persist");

        let reloaded = load_config(&config_path);
        let aspire = catalog.resolve("aspire", &reloaded).expect("aspire");
        assert_eq!(aspire.base_directory, Some(base.clone()));
        assert_eq!(aspire.template_override, Some(tpl));
        assert!(reloaded.get("sketchup").is_some());

        clear_template_directory(&catalog, &mut doc, "aspire").expect("clear");
        persist(&config_path, &mut doc).expect("persist");
        let aspire = catalog.resolve("aspire", &load_config(&config_path)).expect("aspire");
        assert_eq!(aspire.template_override, None);
        assert_eq!(aspire.template_directory(), Some(base.join("Modelos")));
    }

    #[test]
    fn selecting_missing_directory_fails_without_change() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut doc = ConfigDocument::default();
        let catalog = ProfileCatalog::from_document(&doc);
        let err = set_base_directory(&catalog, &mut doc, "aspire", &temp.path().join("nope"))
            .unwrap_err();
        assert!(err.to_string().contains("not an existing directory"));
        assert!(doc.profiles.is_empty());
    }
}
