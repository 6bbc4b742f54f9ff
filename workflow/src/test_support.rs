//! Test-only fixtures: a temporary base folder and scripted collaborators.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use tempfile::TempDir;

use crate::core::types::{AUTOMATIC_TEMPLATE_DIR, Category, WorkflowRequest};
use crate::io::config::ConfigDocument;
use crate::io::confirm::Confirm;
use crate::io::opener::Opener;
use crate::profiles::{Profile, ProfileCatalog};

/// Temporary base folder with an empty automatic template directory.
pub struct TestBase {
    dir: TempDir,
}

impl TestBase {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        fs::create_dir_all(dir.path().join(AUTOMATIC_TEMPLATE_DIR))
            .context("create template dir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path().join(AUTOMATIC_TEMPLATE_DIR)
    }

    /// Write a template file into the automatic template directory.
    pub fn add_template(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.templates_dir().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Built-in profile whose base directory is this folder.
    pub fn profile(&self, name: &str) -> Profile {
        let doc = ConfigDocument::default();
        let mut profile = ProfileCatalog::from_document(&doc)
            .resolve(name, &doc)
            .expect("built-in profile");
        profile.base_directory = Some(self.path().to_path_buf());
        profile
    }
}

/// 2024-03-15, the date used by path examples.
pub fn march_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

/// Client request for project `Acme` with subpath `Kitchen/Cabinet` and output `panel`.
pub fn request(template: &str) -> WorkflowRequest {
    WorkflowRequest {
        profile: "aspire".to_string(),
        category: Category::Client,
        project_name: "Acme".to_string(),
        subpath: Some("Kitchen/Cabinet".to_string()),
        template_filename: Some(template.to_string()),
        output_filename: "panel".to_string(),
    }
}

/// Opener that records paths instead of launching anything.
#[derive(Default)]
pub struct RecordingOpener {
    opened: RefCell<Vec<PathBuf>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Opener that always fails, as on a host without a default application.
pub struct FailingOpener;

impl Opener for FailingOpener {
    fn open(&self, path: &Path) -> Result<()> {
        Err(anyhow!("no default application for {}", path.display()))
    }
}

/// Confirmation that replays queued answers, declining once they run out.
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    asked: Cell<usize>,
}

impl ScriptedConfirm {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            asked: Cell::new(0),
        }
    }

    /// Number of times an overwrite was asked about.
    pub fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm_overwrite(&self, _path: &Path) -> bool {
        self.asked.set(self.asked.get() + 1);
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}
