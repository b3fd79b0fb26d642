//! Command-line interface.

pub mod audit;
pub mod check;
pub mod completions;
pub mod keygen;
pub mod output;
pub mod scan;
pub mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;

/// Envault - Encrypted `.env` files you can commit.
#[derive(Parser)]
#[command(
    name = "envault",
    about = "Encrypt, validate and reconcile .env files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a new 256-bit key
    Keygen {
        /// Store the key in the key file instead of only printing it
        #[arg(short, long)]
        write: bool,
        /// Overwrite an existing key file
        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt .env into config.enc
    Push {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Decrypt config.enc into .env
    Pull {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Replace a .env with different content (a backup is kept)
        #[arg(short, long)]
        force: bool,
    },

    /// Validate .env formatting
    Check {
        /// Path to the .env file
        #[arg(short, long, default_value = constants::ENV_FILE)]
        file: PathBuf,
        /// Rewrite the file with simple errors fixed (a backup is kept)
        #[arg(long)]
        fix: bool,
    },

    /// Check every subdirectory for missing or malformed .env files
    Audit {
        /// Root directory to audit
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Fix formatting issues where possible
        #[arg(long)]
        fix: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an envault command in every managed subdirectory
    Scan {
        /// Command to run (e.g. push, check)
        subcommand: String,
        /// Arguments passed through to the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Keygen { write, force } => keygen::execute(write, force),
        Push { dir } => sync::push(&dir),
        Pull { dir, force } => sync::pull(&dir, force),
        Check { file, fix } => check::execute(&file, fix),
        Audit { dir, fix, json } => audit::execute(&dir, fix, json),
        Scan { subcommand, args } => scan::execute(&subcommand, &args),
        Completions { shell } => completions::execute(shell),
    }
}
