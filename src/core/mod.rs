//! Core business logic module
//!
//! This module contains the bookkeeping components:
//! - `traits` - Persistence seam used by ledgers
//! - `stakes` - Stake sizing from a balance
//! - `ledger` - Per-account balance history and queries
//! - `directory` - Account set, selection and snapshot persistence

pub mod directory;
pub mod ledger;
pub mod stakes;
pub mod traits;

pub use directory::{Directory, DirectoryConfig};
pub use ledger::Ledger;
pub use traits::HistoryLog;
