//! Envault - Encrypted `.env` files you can commit.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── keygen        # Generate and store a key
//! │   ├── sync          # push / pull
//! │   ├── check         # Validate one .env file
//! │   ├── audit         # Reconcile every subdirectory
//! │   ├── scan          # Run a command in every managed subdirectory
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── key           # 256-bit key material
//!     ├── envelope      # AES-256-GCM iv:tag:ciphertext envelope
//!     ├── validation    # .env format rules and auto-fix
//!     ├── detect        # .env / config.enc presence
//!     ├── reconcile     # Directory-wide audit and fix
//!     ├── sync          # Key lookup, push and pull
//!     ├── scan          # Subcommand fan-out
//!     ├── files         # Backups and atomic rewrites
//!     └── config        # .envault.toml management
//! ```
//!
//! # Example
//!
//! ```
//! use envault::core::{envelope, key::Key};
//!
//! let key = Key::generate();
//! let sealed = envelope::seal(b"API_TOKEN=abc\n", &key).unwrap();
//! assert_eq!(envelope::open(&sealed, &key).unwrap(), b"API_TOKEN=abc\n");
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::Config;
pub use crate::core::key::Key;
pub use crate::error::{Error, Result};
