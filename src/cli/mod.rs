// CLI module
// Command-line interface, argument parsing and output rendering

mod args;
pub mod render;

pub use args::{CliArgs, Command};

use crate::core::Directory;
use crate::types::{AccountConfig, BankrollError, Money};
use clap::Parser;
use log::warn;
use std::io::Write;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing subcommand, or `--help`), clap
/// displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Initialize env_logger, defaulting to the verbosity requested on the command line
///
/// `RUST_LOG` takes precedence over `-v` when set.
pub fn init_logging(args: &CliArgs) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp_secs()
        .init();
}

/// Execute one command against the data directory, writing its output to `out`
///
/// # Errors
///
/// Any engine error is returned unchanged; rejected amounts are also logged at
/// `warn` with the account they were aimed at.
pub fn run<W: Write>(args: &CliArgs, out: &mut W) -> Result<(), BankrollError> {
    let config = args.directory_config();

    match &args.command {
        Command::Init {
            name,
            currency,
            precision,
            buy_ins,
        } => {
            let account = AccountConfig::new(name, currency, *precision, *buy_ins)?;
            let directory = Directory::init(&config, account)?;
            writeln!(
                out,
                "Initialized {} with account '{}'",
                directory.data_dir().display(),
                directory.selected()
            )?;
        }
        Command::List => {
            let directory = Directory::load(&config)?;
            write!(out, "{}", render::render_listing(&directory))?;
        }
        Command::Show => {
            let directory = Directory::load(&config)?;
            write!(out, "{}", render::render_overview(&directory)?)?;
        }
        Command::Select { name } => {
            let mut directory = Directory::load(&config)?;
            directory.select(name)?;
            writeln!(out, "Selected '{}'", directory.selected())?;
        }
        Command::Set { amount } => {
            let mut directory = Directory::load(&config)?;
            let text = render::normalize_amount(amount);
            let balance = directory
                .set_balance(&text)
                .inspect_err(|e| log_rejected(&directory, amount, e))?;
            write_balance(out, &directory, balance)?;
        }
        Command::Add { amount } => {
            let mut directory = Directory::load(&config)?;
            let text = render::normalize_amount(amount);
            let balance = directory
                .apply_transaction(&text)
                .inspect_err(|e| log_rejected(&directory, amount, e))?;
            write_balance(out, &directory, balance)?;
        }
        Command::History { limit } => {
            let directory = Directory::load(&config)?;
            let ledger = directory.selected_ledger()?;
            write!(out, "{}", render::render_history(ledger, *limit))?;
        }
    }

    Ok(())
}

fn log_rejected(directory: &Directory, amount: &str, error: &BankrollError) {
    if error.is_recoverable() {
        warn!("{}: rejected amount '{}'", directory.selected(), amount);
    }
}

fn write_balance<W: Write>(
    out: &mut W,
    directory: &Directory,
    balance: Money,
) -> Result<(), BankrollError> {
    let ledger = directory.selected_ledger()?;
    writeln!(
        out,
        "{}: {}",
        ledger.name(),
        balance.format(&ledger.config().currency)
    )?;
    Ok(())
}
