//! Opener abstraction for handing a created file to the host OS.
//!
//! The [`Opener`] trait keeps platform dispatch out of the workflow. Tests use
//! recording openers that never launch anything.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Ask the host environment to open a file with its default application.
pub trait Opener {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Opener backed by the platform's default-application launcher.
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "opening with default application");
        open::that(path).with_context(|| format!("open {}", path.display()))
    }
}
