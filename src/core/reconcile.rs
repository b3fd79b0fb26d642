//! Directory-wide reconciliation of `.env` / `config.enc` pairs.
//!
//! For every immediate subdirectory of a root, the pair is classified, the
//! plaintext (if any) is validated, and fixes are applied on request. The
//! pass is sequential and sorted by directory name. A failure in one
//! directory is recorded against that directory and the pass moves on.
//!
//! Deciding what to do ([`decide`]) is kept apart from doing it
//! ([`apply_fix`]) so the decision can be tested without a filesystem.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::detect::{self, Presence};
use crate::core::files;
use crate::core::validation::{self, Validation};
use crate::error::{Error, Result};

/// Per-directory state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PairState {
    /// Encrypted sibling exists, plaintext does not.
    Missing,
    /// Plaintext exists without an encrypted sibling. Informational.
    Untracked,
    /// Plaintext is structurally valid.
    Pass,
    /// Plaintext is invalid and was not fixed, or the directory could not be processed.
    Fail,
    /// Plaintext was invalid and has been rewritten.
    Fixed,
}

impl PairState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "MISSING",
            Self::Untracked => "UNTRACKED",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Fixed => "FIXED",
        }
    }

    /// Whether this state counts toward the issue tally.
    pub fn is_issue(&self) -> bool {
        matches!(self, Self::Missing | Self::Fail)
    }
}

impl fmt::Display for PairState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported line of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Subdirectory name relative to the root
    pub dir: String,
    pub state: PairState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Entry {
    fn new(dir: &str, state: PairState) -> Self {
        Self {
            dir: dir.to_string(),
            state,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Summary of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Directories with a plaintext file
    pub scanned: usize,
    /// `MISSING` plus `FAIL` entries
    pub issues: usize,
    /// `FIXED` entries
    pub fixed: usize,
    pub entries: Vec<Entry>,
}

impl Report {
    /// Zero issues is the only fully clean outcome.
    pub fn is_clean(&self) -> bool {
        self.issues == 0
    }

    fn record(&mut self, entry: Entry) {
        if entry.state.is_issue() {
            self.issues += 1;
        }
        if entry.state == PairState::Fixed {
            self.fixed += 1;
        }
        self.entries.push(entry);
    }
}

/// Options for [`reconcile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Rewrite fixable files in place (after taking a backup).
    pub fix: bool,
}

/// What to do with a validated plaintext file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do. Warnings without errors land here when no fix applies.
    Pass,
    /// Replace the file with this content.
    Rewrite(String),
    /// Leave the file and report it.
    Fail,
}

/// Decide the action for a validation result.
pub fn decide(validation: &Validation, fix: bool) -> Action {
    if validation.is_clean() {
        return Action::Pass;
    }
    if fix {
        if let Some(fixed) = &validation.fixed {
            return Action::Rewrite(fixed.clone());
        }
    }
    if validation.is_valid() {
        Action::Pass
    } else {
        Action::Fail
    }
}

/// Rewrite `dir/.env` with `fixed`, keeping the original as `dir/.env.bak`.
pub fn apply_fix(dir: &Path, fixed: &str) -> Result<()> {
    rewrite_with_backup(&dir.join(constants::ENV_FILE), fixed.as_bytes())?;
    debug!(dir = %dir.display(), "fix applied");
    Ok(())
}

/// Rewrite `path` with `fixed`, keeping the original as `<name>.bak` next to it.
///
/// Order matters: the backup is written and synced first, then the backup
/// name is added to an existing `.gitignore`, then the file is replaced.
/// Returns the backup path.
pub fn rewrite_with_backup(path: &Path, fixed: &[u8]) -> Result<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| constants::ENV_FILE.to_string());
    let backup_name = format!("{}.bak", name);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let backup_path = dir.join(&backup_name);

    files::backup(path, &backup_path)?;
    files::ensure_ignored(dir, &backup_name, false)?;
    files::write_atomic(path, fixed)?;

    Ok(backup_path)
}

/// Reconcile every immediate subdirectory of `root`.
///
/// # Errors
///
/// Only failing to list `root` itself is an error. Problems inside a
/// subdirectory are reported as `FAIL` entries.
pub fn reconcile(root: &Path, config: &Config, options: &Options) -> Result<Report> {
    let dirs = subdirectories(root, config)?;
    debug!(root = %root.display(), count = dirs.len(), "reconciling");

    let mut report = Report::default();

    for (name, path) in dirs {
        let presence = detect::classify(&path);
        debug!(dir = %name, ?presence, "classified");

        match presence {
            Presence::Neither => continue,
            Presence::EncryptedOnly => {
                report.record(Entry::new(&name, PairState::Missing));
                continue;
            }
            Presence::PlaintextOnly => {
                report.record(Entry::new(&name, PairState::Untracked));
            }
            Presence::Both => {}
        }

        report.scanned += 1;
        let entry = check_dir(&name, &path, options.fix).unwrap_or_else(|e| {
            warn!(dir = %name, error = %e, "directory failed");
            let mut entry = Entry::new(&name, PairState::Fail);
            entry.errors.push(e.to_string());
            entry
        });
        report.record(entry);
    }

    Ok(report)
}

/// Validate one directory's plaintext and act on the result.
fn check_dir(name: &str, dir: &Path, fix: bool) -> Result<Entry> {
    let env_path = dir.join(constants::ENV_FILE);
    let content = fs::read_to_string(&env_path).map_err(|e| Error::fs(&env_path, e))?;
    let validation = validation::validate(&content);

    let state = match decide(&validation, fix) {
        Action::Pass => PairState::Pass,
        Action::Rewrite(fixed) => {
            apply_fix(dir, &fixed)?;
            PairState::Fixed
        }
        Action::Fail => PairState::Fail,
    };

    let mut entry = Entry::new(name, state);
    if state != PairState::Fixed {
        entry.errors = validation.errors();
        entry.warnings = validation.warnings();
    }
    Ok(entry)
}

/// Immediate, non-hidden, non-excluded subdirectories sorted by name.
///
/// An entry that cannot be read is logged and skipped.
pub fn subdirectories(root: &Path, config: &Config) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(root).map_err(|e| Error::fs(root, e))?;

    let listing = entries.map(|entry| {
        entry.map(|e| {
            let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
            (e.file_name().to_string_lossy().to_string(), e.path(), is_dir)
        })
    });
    Ok(select_dirs(root, config, listing))
}

fn select_dirs<I>(root: &Path, config: &Config, listing: I) -> Vec<(String, PathBuf)>
where
    I: IntoIterator<Item = std::io::Result<(String, PathBuf, bool)>>,
{
    let mut dirs = Vec::new();
    for entry in listing {
        let (name, path, is_dir) = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !is_dir || name.starts_with('.') || config.is_excluded(&name) {
            continue;
        }
        dirs.push((name, path));
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs
}
