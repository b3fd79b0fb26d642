//! Error types.
//!
//! Errors are layered: each concern has its own enum and the top-level
//! [`Error`] wraps them so callers can match on the category they care about.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A read, write or permission failure on a specific path.
    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document has formatting errors with no safe automatic fix.
    #[error("{} has {errors} formatting {}", .path.display(), noun(.errors, "error", "errors"))]
    Format { path: PathBuf, errors: usize },

    /// Reconciliation finished but left unresolved issues.
    #[error("found issues in {n} {}", noun(.0, "directory", "directories"), n = .0)]
    IssuesFound(usize),

    /// One or more scanned directories exited unsuccessfully.
    #[error("scan completed with {n} {}", noun(.0, "failure", "failures"), n = .0)]
    ScanFailed(usize),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Key material errors.
///
/// Never carries the key text itself.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("invalid key: expected 64 hexadecimal characters")]
    Invalid,

    #[error("no key found: set {env} or create {}", .file.display())]
    NotFound { env: &'static str, file: PathBuf },

    #[error("key file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

/// Envelope sealing and opening errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Tag verification failed. Wrong key and tampered data are
    /// deliberately indistinguishable.
    #[error("authentication failed: wrong key or corrupted data")]
    AuthenticationFailure,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn noun(count: &usize, one: &'static str, many: &'static str) -> &'static str {
    if *count == 1 {
        one
    } else {
        many
    }
}
