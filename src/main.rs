//! fromagerie CLI - cheese plant operations calculators
//!
//! Thin wrapper around `fromagerie::cli`; see `fromagerie help`.

use std::process::ExitCode;

use fromagerie::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
