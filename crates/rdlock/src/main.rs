//! rdlock - Entry Point
//!
//! Binary entry point for the `rdlock` command line tool.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Lock acquired / released, or query answered |
//! | 1 | Lock held by someone else |
//! | 2 | Error (store unavailable, bad configuration, bad arguments) |

// Force-link rdlock-providers to ensure linkme registrations are included
extern crate rdlock_providers;

use clap::Parser;
use rdlock::cli::{Cli, EXIT_ERROR, run};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
