//! Audit command - reconcile every subdirectory of a root.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::reconcile::{self, Entry, Options, PairState, Report};
use crate::error::{Error, Result};

/// Audit the subdirectories of `dir`.
pub fn execute(dir: &Path, fix: bool, json: bool) -> Result<()> {
    let config = Config::load_from(dir)?;
    let report = reconcile::reconcile(dir, &config, &Options { fix })?;
    info!(
        scanned = report.scanned,
        issues = report.issues,
        fixed = report.fixed,
        "audit complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(dir, &report, fix);
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(Error::IssuesFound(report.issues))
    }
}

fn print_report(dir: &Path, report: &Report, fix: bool) {
    let root = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    output::header(&format!("Auditing .env files in {}", output::path(root.display())));
    println!();

    for entry in &report.entries {
        print_entry(entry);
    }

    output::rule();
    if report.is_clean() {
        if report.fixed > 0 {
            output::success(&format!(
                "checked {} {}, fixed {}",
                report.scanned,
                plural(report.scanned, "directory", "directories"),
                report.fixed
            ));
        } else {
            output::success(&format!(
                "checked {} {}, 0 issues found",
                report.scanned,
                plural(report.scanned, "directory", "directories")
            ));
        }
    } else if !fix {
        output::hint("run with --fix to automatically resolve formatting issues");
    }
}

fn print_entry(entry: &Entry) {
    let note = match entry.state {
        PairState::Missing => Some("(found config.enc, needs pull)"),
        PairState::Untracked => Some("(has .env, but no config.enc)"),
        PairState::Fixed => Some("(backup created)"),
        PairState::Pass | PairState::Fail => None,
    };
    output::state(entry.state, &entry.dir, note);

    for error in &entry.errors {
        output::list_item(error, true);
    }
    for warning in &entry.warnings {
        output::list_item(warning, false);
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
