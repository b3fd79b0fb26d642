//! Envault - Encrypted `.env` files you can commit.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envault::cli::output;
use envault::cli::{execute, Cli};
use envault::core::constants::LOG_ENV;
use envault::error::{CipherError, Error, KeyError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envault=debug")
        } else {
            EnvFilter::new("envault=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Key(KeyError::NotFound { .. }) => Some("run: envault keygen --write"),
            Error::Cipher(CipherError::AuthenticationFailure) => {
                Some("check that ENVAULT_KEY matches the key used to push")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
