//! Shopkeep CLI Entry Point
//!
//! This is the binary entry point. All logic lives in `lib.rs`.

use std::process::ExitCode;

fn main() -> ExitCode {
    shopkeep_cli::main_entry()
}
