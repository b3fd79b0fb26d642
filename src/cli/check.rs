//! Check command - validate a single .env file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::reconcile::{self, Action};
use crate::core::validation;
use crate::error::{Error, Result};

/// Validate `file`, optionally rewriting it with fixes applied.
pub fn execute(file: &Path, fix: bool) -> Result<()> {
    let content = fs::read_to_string(file).map_err(|e| Error::fs(file, e))?;
    let result = validation::validate(&content);

    output::header(&format!("Checking {}...", file.display()));

    if result.is_clean() {
        output::success("no issues found");
        return Ok(());
    }

    for warning in result.warnings() {
        output::warn(&warning);
    }
    for error in result.errors() {
        output::error(&error);
    }

    match reconcile::decide(&result, fix) {
        Action::Rewrite(fixed) => {
            let backup = reconcile::rewrite_with_backup(file, fixed.as_bytes())?;
            info!(path = %file.display(), "fixed");
            output::success(&format!(
                "fixed formatting issues (backup: {})",
                output::path(backup.display())
            ));
            Ok(())
        }
        Action::Pass => {
            if result.fixed.is_some() {
                output::hint("run with --fix to clean up warnings");
            }
            Ok(())
        }
        Action::Fail => {
            if result.fixed.is_some() {
                output::hint("run with --fix to automatically resolve formatting issues");
            }
            Err(Error::Format {
                path: file.to_path_buf(),
                errors: result.errors().len(),
            })
        }
    }
}
