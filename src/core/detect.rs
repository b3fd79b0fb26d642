//! Plaintext/encrypted pair detection.
//!
//! Looks only at whether the two files exist; contents are never read.

use std::path::Path;

use serde::Serialize;

use crate::core::constants;

/// Which halves of the `.env` / `config.enc` pair are present in a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Both,
    PlaintextOnly,
    EncryptedOnly,
    Neither,
}

impl Presence {
    /// Whether there is a local plaintext file to validate.
    pub fn has_plaintext(&self) -> bool {
        matches!(self, Self::Both | Self::PlaintextOnly)
    }

    /// Whether the encrypted sibling exists.
    pub fn has_encrypted(&self) -> bool {
        matches!(self, Self::Both | Self::EncryptedOnly)
    }
}

/// Classify `dir` by the presence of its plaintext and encrypted files.
///
/// A missing directory or missing files are normal outcomes and map to
/// [`Presence::Neither`] or a partial presence, never to an error.
pub fn classify(dir: &Path) -> Presence {
    let plaintext = dir.join(constants::ENV_FILE).exists();
    let encrypted = dir.join(constants::ENCRYPTED_FILE).exists();

    match (plaintext, encrypted) {
        (true, true) => Presence::Both,
        (true, false) => Presence::PlaintextOnly,
        (false, true) => Presence::EncryptedOnly,
        (false, false) => Presence::Neither,
    }
}
