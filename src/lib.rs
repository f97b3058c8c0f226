//! Bankroll Manager Library
//! # Overview
//!
//! This library tracks one or more poker bankrolls and derives, for each, the
//! stakes it can sustainably play and how it changed over recent periods.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Money, HistoryRecord, AccountConfig, reports)
//! - [`cli`] - CLI arguments parsing and output rendering
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - One account's balance history and the queries over it
//!   - [`core::stakes`] - Blind and buy-in sizes supported by a balance
//!   - [`core::directory`] - Account registry, selection and snapshot persistence
//! - [`io`] - Snapshot file, per-account CSV history and in-memory logs
//!
//! # Money
//!
//! Amounts are exact decimals with an explicit number of fractional digits.
//! Input more precise than the account allows is rejected, never rounded:
//!
//! ```
//! use bankroll_manager::Money;
//!
//! let amount = Money::parse("1449.75").unwrap();
//! assert_eq!(amount.format("$"), "$1,449.75");
//! assert!(amount.quantize(1).is_err());
//! ```
//!
//! # Persistence
//!
//! A data directory holds `state.json` (accounts and the selection) plus one
//! append-only `<account>.csv` history per account. History is the source of
//! truth for balances; it is replayed in full at load.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{Directory, DirectoryConfig, HistoryLog, Ledger};
pub use types::{
    AccountConfig, BankrollError, ChangeReport, HistoryRecord, Money, Period, StakeQuote, Trend,
};
