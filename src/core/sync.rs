//! Push and pull between `.env` and `config.enc`.
//!
//! Push seals the plaintext into its encrypted sibling; pull opens the
//! sibling back into plaintext.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::envelope;
use crate::core::files;
use crate::core::key::Key;
use crate::core::reconcile;
use crate::error::{Error, KeyError, Result};

/// Where the key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// The `ENVAULT_KEY` environment variable.
    Env,
    /// A key file on disk.
    File(PathBuf),
}

/// Outcome of a pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulled {
    /// `.env` was created.
    Created,
    /// `.env` already matched the decrypted content.
    Unchanged,
    /// `.env` differed and was replaced after a backup.
    Replaced,
}

/// Resolve the key for `dir`: `ENVAULT_KEY` first, then the configured key file.
///
/// # Errors
///
/// Returns `KeyError::NotFound` if neither source exists and
/// `KeyError::Invalid` if the found text is not a valid key.
pub fn load_key(dir: &Path, config: &Config) -> Result<(Key, KeySource)> {
    if let Ok(text) = std::env::var(constants::KEY_ENV) {
        let text = Zeroizing::new(text);
        if !text.trim().is_empty() {
            debug!("using key from environment");
            return Ok((text.trim().parse()?, KeySource::Env));
        }
    }

    let path = config.key_path(dir);
    if !path.exists() {
        return Err(KeyError::NotFound {
            env: constants::KEY_ENV,
            file: path,
        }
        .into());
    }

    let text = Zeroizing::new(fs::read_to_string(&path).map_err(|e| Error::fs(&path, e))?);
    debug!(path = %path.display(), "using key file");
    Ok((text.trim().parse()?, KeySource::File(path)))
}

/// Seal `dir/.env` into `dir/config.enc`. Returns the plaintext size.
pub fn push(dir: &Path, key: &Key) -> Result<usize> {
    let env_path = dir.join(constants::ENV_FILE);
    let enc_path = dir.join(constants::ENCRYPTED_FILE);

    let plaintext = Zeroizing::new(fs::read(&env_path).map_err(|e| Error::fs(&env_path, e))?);
    let sealed = envelope::seal(&plaintext, key)?;
    files::write_atomic(&enc_path, format!("{}\n", sealed).as_bytes())?;

    debug!(bytes = plaintext.len(), path = %enc_path.display(), "pushed");
    Ok(plaintext.len())
}

/// Open `dir/config.enc` into `dir/.env`.
///
/// An existing `.env` with different content is only replaced when `force`
/// is set, and is backed up first.
///
/// # Errors
///
/// Propagates envelope failures unchanged; nothing is written when the
/// envelope does not authenticate.
pub fn pull(dir: &Path, key: &Key, force: bool) -> Result<Pulled> {
    let env_path = dir.join(constants::ENV_FILE);
    let enc_path = dir.join(constants::ENCRYPTED_FILE);

    let sealed = fs::read_to_string(&enc_path).map_err(|e| Error::fs(&enc_path, e))?;
    let plaintext = Zeroizing::new(envelope::open(&sealed, key)?);

    if !env_path.exists() {
        files::write_private(&env_path, &plaintext)?;
        debug!(path = %env_path.display(), "pulled");
        return Ok(Pulled::Created);
    }

    let current = Zeroizing::new(fs::read(&env_path).map_err(|e| Error::fs(&env_path, e))?);
    if current.as_slice() == plaintext.as_slice() {
        return Ok(Pulled::Unchanged);
    }

    if !force {
        return Err(Error::fs(
            &env_path,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "local file differs from config.enc (use --force to overwrite)",
            ),
        ));
    }

    reconcile::rewrite_with_backup(&env_path, &plaintext)?;
    debug!(path = %env_path.display(), "pulled over existing file");
    Ok(Pulled::Replaced)
}
