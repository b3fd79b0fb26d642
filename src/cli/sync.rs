//! Push and pull commands.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::sync::{self, KeySource, Pulled};
use crate::error::Result;

/// Encrypt `dir/.env` into `dir/config.enc`.
pub fn push(dir: &Path) -> Result<()> {
    let config = Config::load_from(dir)?;
    let (key, source) = sync::load_key(dir, &config)?;
    log_source(&source);

    let bytes = sync::push(dir, &key)?;
    output::success(&format!(
        "encrypted {} into {} ({} bytes)",
        constants::ENV_FILE,
        output::path(dir.join(constants::ENCRYPTED_FILE).display()),
        bytes
    ));
    Ok(())
}

/// Decrypt `dir/config.enc` into `dir/.env`.
pub fn pull(dir: &Path, force: bool) -> Result<()> {
    let config = Config::load_from(dir)?;
    let (key, source) = sync::load_key(dir, &config)?;
    log_source(&source);

    let env_path = dir.join(constants::ENV_FILE);
    match sync::pull(dir, &key, force)? {
        Pulled::Created => {
            output::success(&format!("decrypted into {}", output::path(env_path.display())))
        }
        Pulled::Unchanged => output::success("already up to date"),
        Pulled::Replaced => {
            output::success(&format!("decrypted into {}", output::path(env_path.display())));
            output::dimmed(&format!("previous contents saved to {}", constants::BACKUP_FILE));
        }
    }
    Ok(())
}

fn log_source(source: &KeySource) {
    match source {
        KeySource::Env => info!("key from {}", constants::KEY_ENV),
        KeySource::File(path) => info!(path = %path.display(), "key from file"),
    }
}
