//! Fan a subcommand out over managed subdirectories.
//!
//! A subdirectory is managed when it holds a `.env`, a key file or a
//! `config.enc`. Each target is handed to a [`Dispatch`] in name order and
//! the pass continues past failures.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::reconcile;
use crate::error::{Error, Result};

/// Runs one subcommand inside one directory.
pub trait Dispatch {
    /// Returns the exit code, or `None` if the child was killed by a signal.
    fn run(&self, dir: &Path, subcommand: &str, args: &[String]) -> Result<Option<i32>>;
}

/// Re-invokes an executable (normally the running binary) with the
/// target directory as its working directory.
#[derive(Debug, Clone)]
pub struct ProcessDispatch {
    program: PathBuf,
}

impl ProcessDispatch {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Dispatch to the currently running executable.
    pub fn current() -> Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }
}

impl Dispatch for ProcessDispatch {
    fn run(&self, dir: &Path, subcommand: &str, args: &[String]) -> Result<Option<i32>> {
        debug!(dir = %dir.display(), subcommand, "spawning");
        let status = Command::new(&self.program)
            .arg(subcommand)
            .args(args)
            .current_dir(dir)
            .status()
            .map_err(|e| Error::fs(&self.program, e))?;
        Ok(status.code())
    }
}

/// Result of running the subcommand in one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Non-zero exit; `None` when terminated by a signal.
    Failed(Option<i32>),
    /// The child could not be started.
    SpawnFailed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Progress notifications from [`run`].
#[derive(Debug)]
pub enum Progress<'a> {
    Started(&'a str),
    Finished(&'a str, &'a Outcome),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub targets: Vec<String>,
    pub failures: usize,
}

impl ScanSummary {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

/// Managed subdirectories of `root`, sorted by name.
pub fn targets(root: &Path, config: &Config) -> Result<Vec<(String, PathBuf)>> {
    let managed = [
        constants::ENV_FILE,
        constants::ENCRYPTED_FILE,
        config.keys.file.as_str(),
    ];

    let dirs = reconcile::subdirectories(root, config)?
        .into_iter()
        .filter(|(_, path)| managed.iter().any(|name| path.join(name).exists()))
        .collect();
    Ok(dirs)
}

/// Run `subcommand args...` in every target under `root`.
///
/// # Errors
///
/// Only failing to list `root` is an error. Per-target failures are
/// counted in the summary.
pub fn run(
    root: &Path,
    config: &Config,
    dispatch: &dyn Dispatch,
    subcommand: &str,
    args: &[String],
    mut progress: impl FnMut(Progress<'_>),
) -> Result<ScanSummary> {
    let targets = targets(root, config)?;
    let mut summary = ScanSummary {
        targets: targets.iter().map(|(name, _)| name.clone()).collect(),
        failures: 0,
    };

    for (name, path) in &targets {
        progress(Progress::Started(name));

        let outcome = match dispatch.run(path, subcommand, args) {
            Ok(Some(0)) => Outcome::Success,
            Ok(code) => Outcome::Failed(code),
            Err(e) => {
                warn!(dir = %name, error = %e, "failed to start");
                Outcome::SpawnFailed(e.to_string())
            }
        };

        if !outcome.is_success() {
            summary.failures += 1;
        }
        progress(Progress::Finished(name, &outcome));
    }

    Ok(summary)
}
