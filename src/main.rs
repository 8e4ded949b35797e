//! # find-identical CLI
//!
//! Command-line interface for the identical image finder.
//!
//! ## Usage
//! ```bash
//! find-identical --folder ~/datasets/cats
//! find-identical --folder ~/datasets/cats --clean --keep oldest
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
