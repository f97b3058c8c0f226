//! Bankroll Manager CLI
//!
//! Command-line interface for tracking poker bankrolls kept in a data directory.
//!
//! # Usage
//!
//! ```bash
//! bankroll --data-dir ~/bankroll init --name main --currency '$' --precision 2 --buy-ins 30
//! bankroll set 1,500
//! bankroll add -50.25
//! bankroll show
//! bankroll history --limit 10
//! bankroll -v select live
//! ```
//!
//! The data directory defaults to the current directory and can also be given
//! through `BANKROLL_DATA_DIR`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (rejected amount, unknown account, unreadable or corrupt data, etc.)

use bankroll_manager::cli;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    cli::init_logging(&args);

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
