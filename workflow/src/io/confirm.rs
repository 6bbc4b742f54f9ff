//! Overwrite confirmation for an existing project file.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

/// Decide whether an existing destination file may be replaced.
pub trait Confirm {
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

/// Accepts every overwrite (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm_overwrite(&self, _path: &Path) -> bool {
        true
    }
}

/// Prompts on stderr and reads the answer from stdin.
///
/// Anything other than `y` or `yes` declines, including end of input.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        eprint!("overwrite {name}? [y/N] ");
        if let Err(err) = io::stderr().flush() {
            debug!(error = %err, "could not flush confirmation prompt");
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                debug!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n\n"));
        assert!(!is_yes("yep"));
    }
}
