//! Constants used throughout envault.
//!
//! Centralizes file names and environment variable names.

/// Plaintext environment file name (.env).
pub const ENV_FILE: &str = ".env";

/// Encrypted sibling of the plaintext file, safe to commit.
pub const ENCRYPTED_FILE: &str = "config.enc";

/// Copy of the plaintext file taken before any in-place rewrite.
pub const BACKUP_FILE: &str = ".env.bak";

/// Version-control ignore list.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Default key file name, relative to the project directory.
pub const KEY_FILE: &str = ".envault_key";

/// Optional configuration file name (.envault.toml).
pub const CONFIG_FILE: &str = ".envault.toml";

/// Environment variable holding the hex key. Takes precedence over the key file.
pub const KEY_ENV: &str = "ENVAULT_KEY";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "ENVAULT_LOG";
