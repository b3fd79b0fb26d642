//! Authenticated encryption envelope.
//!
//! Seals a payload with AES-256-GCM under a [`Key`] and serializes the
//! result as three lowercase hex fields joined by `:`:
//!
//! ```text
//! <iv_hex>:<tag_hex>:<ciphertext_hex>
//! ```
//!
//! Every call to [`seal`] draws a fresh 96-bit IV, so sealing the same
//! plaintext twice never yields the same envelope.

use std::fmt;
use std::str::FromStr;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;

use crate::core::key::Key;
use crate::error::{CipherError, Result};

/// IV (nonce) length in bytes.
pub const IV_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

const SEPARATOR: char = ':';

/// A parsed envelope: IV, authentication tag, and ciphertext.
#[derive(Debug, Clone)]
pub struct Envelope {
    iv: [u8; IV_LEN],
    tag: [u8; TAG_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypt `plaintext` under `key` with a fresh random IV.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the AEAD rejects the input.
    pub fn seal(plaintext: &[u8], key: &Key) -> Result<Self> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let cipher = Aes256Gcm::new(key.as_bytes().into());
        let mut sealed = cipher
            .encrypt(Nonce::from_slice(&iv), plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        if sealed.len() < TAG_LEN {
            return Err(CipherError::EncryptionFailed(
                "ciphertext shorter than authentication tag".to_string(),
            )
            .into());
        }

        // aes-gcm appends the tag to the ciphertext.
        let tag_bytes = sealed.split_off(sealed.len() - TAG_LEN);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&tag_bytes);

        trace!(ciphertext_len = sealed.len(), "sealed");

        Ok(Self {
            iv,
            tag,
            ciphertext: sealed,
        })
    }

    /// Verify the tag and decrypt.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::AuthenticationFailure` if the tag does not
    /// verify. No partial plaintext is ever returned.
    pub fn open(&self, key: &Key) -> Result<Vec<u8>> {
        trace!(ciphertext_len = self.ciphertext.len(), "opening");

        let mut combined = Vec::with_capacity(self.ciphertext.len() + TAG_LEN);
        combined.extend_from_slice(&self.ciphertext);
        combined.extend_from_slice(&self.tag);

        let cipher = Aes256Gcm::new(key.as_bytes().into());
        cipher
            .decrypt(Nonce::from_slice(&self.iv), combined.as_slice())
            .map_err(|_| CipherError::AuthenticationFailure.into())
    }

    /// The IV used for this envelope.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    /// Ciphertext without the tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            hex::encode(self.iv),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext),
            sep = SEPARATOR
        )
    }
}

impl FromStr for Envelope {
    type Err = crate::error::Error;

    fn from_str(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.trim().split(SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(CipherError::MalformedEnvelope(format!(
                "expected 3 ':'-separated fields, found {}",
                parts.len()
            ))
            .into());
        }

        let mut iv = [0u8; IV_LEN];
        decode_fixed(parts[0], &mut iv, "iv")?;

        let mut tag = [0u8; TAG_LEN];
        decode_fixed(parts[1], &mut tag, "tag")?;

        ensure_lower_hex(parts[2], "ciphertext")?;
        let ciphertext = hex::decode(parts[2])
            .map_err(|e| CipherError::MalformedEnvelope(format!("ciphertext: {}", e)))?;

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }
}

fn decode_fixed(field: &str, out: &mut [u8], name: &str) -> Result<()> {
    if field.len() != out.len() * 2 {
        return Err(CipherError::MalformedEnvelope(format!(
            "{} must be {} hex characters, found {}",
            name,
            out.len() * 2,
            field.len()
        ))
        .into());
    }
    ensure_lower_hex(field, name)?;
    hex::decode_to_slice(field, out)
        .map_err(|e| CipherError::MalformedEnvelope(format!("{}: {}", name, e)).into())
}

/// Envelope fields are lowercase hex only, so every text maps to one byte string.
fn ensure_lower_hex(field: &str, name: &str) -> Result<()> {
    match field
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        Some((index, c)) => Err(CipherError::MalformedEnvelope(format!(
            "{}: invalid character {:?} at position {}",
            name, c, index
        ))
        .into()),
        None => Ok(()),
    }
}

/// Seal `plaintext` and return the serialized envelope text.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if encryption fails.
pub fn seal(plaintext: &[u8], key: &Key) -> Result<String> {
    Ok(Envelope::seal(plaintext, key)?.to_string())
}

/// Parse envelope text and decrypt it.
///
/// # Errors
///
/// Returns `CipherError::MalformedEnvelope` if the text cannot be parsed and
/// `CipherError::AuthenticationFailure` if the tag does not verify.
pub fn open(envelope: &str, key: &Key) -> Result<Vec<u8>> {
    envelope.parse::<Envelope>()?.open(key)
}
