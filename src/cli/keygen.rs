//! Keygen command - create a new key.

use std::path::Path;

use dialoguer::Confirm;
use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::{files, key::Key};
use crate::error::{KeyError, Result};

/// Print a new key, or store it in the key file with `write`.
pub fn execute(write: bool, force: bool) -> Result<()> {
    let key = Key::generate();

    if !write {
        // Bare output so the key can be captured by scripts.
        println!("{}", key.to_hex());
        return Ok(());
    }

    let config = Config::load()?;
    let path = config.key_path(Path::new("."));

    if path.exists() && !force && !confirm_overwrite(&path)? {
        return Err(KeyError::AlreadyExists(path).into());
    }

    files::write_private(&path, format!("{}\n", key.to_hex()).as_bytes())?;
    info!(path = %path.display(), "key written");
    output::success(&format!("wrote {}", output::path(path.display())));

    if files::ensure_ignored(Path::new("."), &config.keys.file, true)? {
        output::dimmed(&format!("added {} to .gitignore", config.keys.file));
    }
    output::hint(&format!(
        "share the key out of band, then run {}",
        output::cmd("envault push")
    ));
    Ok(())
}

/// Ask before replacing an existing key. Non-interactive runs never overwrite.
fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    output::warn("replacing the key makes existing config.enc files unreadable");
    Confirm::new()
        .with_prompt(format!("Overwrite {}?", path.display()))
        .default(false)
        .interact()
        .map_err(Into::into)
}
