//! Core library components.
//!
//! Key material, the envelope cipher, `.env` validation and the directory
//! passes built on them. Nothing in here prints; the CLI layer owns output.

pub mod config;
pub mod constants;
pub mod detect;
pub mod envelope;
pub mod files;
pub mod key;
pub mod reconcile;
pub mod scan;
pub mod sync;
pub mod validation;
