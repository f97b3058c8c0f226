use crate::core::DirectoryConfig;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Track poker bankrolls and the stakes they support
#[derive(Parser, Debug)]
#[command(name = "bankroll")]
#[command(about = "Track poker bankrolls and the stakes they support", long_about = None)]
pub struct CliArgs {
    /// Data directory holding state.json and the history files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "BANKROLL_DATA_DIR",
        default_value = ".",
        global = true,
        help = "Directory holding state.json and one <account>.csv per account"
    )]
    pub data_dir: PathBuf,

    /// Logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v info, -vv debug); RUST_LOG overrides"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations available from the command line
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a data directory with a first account
    Init {
        #[arg(long, value_name = "NAME")]
        name: String,

        #[arg(long, value_name = "SYMBOL", default_value = "$")]
        currency: String,

        #[arg(long, value_name = "DIGITS", default_value_t = 2)]
        precision: u32,

        #[arg(long = "buy-ins", value_name = "COUNT")]
        buy_ins: u32,
    },

    /// List accounts, marking the selected one
    List,

    /// Show balance, stakes and recent changes of the selected account
    Show,

    /// Select the active account
    Select {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Set the selected account's balance
    Set {
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,
    },

    /// Add a signed transaction to the selected account's balance
    Add {
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,
    },

    /// Print the selected account's balance history, newest last
    History {
        #[arg(long, value_name = "COUNT", help = "Only print the last COUNT records")]
        limit: Option<usize>,
    },
}

impl CliArgs {
    pub fn directory_config(&self) -> DirectoryConfig {
        DirectoryConfig::new(&self.data_dir)
    }

    /// Default log filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
