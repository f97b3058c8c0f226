//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: Fixed-precision monetary amounts
//! - `account`: Typed account settings
//! - `record`: History records
//! - `report`: Stake quotes, change reports and reporting periods
//! - `error`: Error types for the bankroll manager

pub mod account;
pub mod error;
pub mod money;
pub mod record;
pub mod report;

pub use account::AccountConfig;
pub use error::BankrollError;
pub use money::{Money, MAX_PRECISION};
pub use record::HistoryRecord;
pub use report::{ChangeReport, Period, StakeQuote, Trend};
