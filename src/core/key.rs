//! Symmetric key material.
//!
//! A key is 32 random bytes, stored and exchanged as 64 hexadecimal
//! characters. Persisting the key is left to the caller (environment
//! variable, key file, secret store).

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KeyError, Result};

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Length of the hex encoding of a key.
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;

/// A 256-bit symmetric key. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Generate a new key from the operating system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Build a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Key {
    type Err = crate::error::Error;

    /// Parse a key from its hex text.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Invalid` unless the text is exactly 64 hex digits.
    fn from_str(text: &str) -> Result<Self> {
        if !validate(text) {
            return Err(KeyError::Invalid.into());
        }
        let mut bytes = [0u8; KEY_LEN];
        hex::decode_to_slice(text, &mut bytes).map_err(|_| KeyError::Invalid)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}

/// Generate a fresh key and return its hex encoding.
pub fn generate() -> String {
    Key::generate().to_hex()
}

/// Whether `text` is a well-formed key: exactly 64 hex digits.
///
/// Never fails; malformed input yields `false`. Surrounding whitespace is
/// not accepted, callers reading from files trim first.
pub fn validate(text: &str) -> bool {
    text.len() == KEY_HEX_LEN && text.bytes().all(|b| b.is_ascii_hexdigit())
}
