//! # MarketCalc Entry Point
//!
//! The setup lives in `lib.rs` so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    match marketcalc_terminal::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
