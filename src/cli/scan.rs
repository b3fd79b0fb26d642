//! Scan command - run a subcommand in every managed subdirectory.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::scan::{self, Outcome, ProcessDispatch, Progress};
use crate::error::{Error, Result};

/// Re-run `envault <subcommand> <args>` in each managed subdirectory of the
/// current directory.
pub fn execute(subcommand: &str, args: &[String]) -> Result<()> {
    let root = Path::new(".");
    let config = Config::load_from(root)?;
    let dispatch = ProcessDispatch::current()?;

    let summary = scan::run(root, &config, &dispatch, subcommand, args, |progress| {
        match progress {
            Progress::Started(dir) => {
                output::section(&format!("{} ({})", dir, output::cmd(subcommand)))
            }
            Progress::Finished(dir, Outcome::Success) => {
                output::success(&format!("success in {}", dir))
            }
            Progress::Finished(dir, Outcome::Failed(Some(code))) => {
                output::error(&format!("command failed in {} (exit code {})", dir, code))
            }
            Progress::Finished(dir, Outcome::Failed(None)) => {
                output::error(&format!("command in {} was terminated", dir))
            }
            Progress::Finished(dir, Outcome::SpawnFailed(reason)) => {
                output::error(&format!("failed to start in {}: {}", dir, reason))
            }
        }
    })?;

    info!(targets = summary.targets.len(), failures = summary.failures, "scan complete");

    if summary.targets.is_empty() {
        output::warn("no managed subdirectories found (dirs with .env, .envault_key, or config.enc)");
        return Ok(());
    }

    if !summary.is_success() {
        return Err(Error::ScanFailed(summary.failures));
    }

    println!();
    output::success(&format!(
        "scan completed on {} {}",
        summary.targets.len(),
        if summary.targets.len() == 1 { "target" } else { "targets" }
    ));
    Ok(())
}
