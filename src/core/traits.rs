//! Core traits for ledger persistence
//!
//! A ledger persists its own history appends through a [`HistoryLog`]. The
//! CSV file implementation is used in production; the in-memory one lets
//! ledgers run without touching disk.

use crate::types::{BankrollError, HistoryRecord};
use std::fmt::Debug;

/// Durable sink for one account's history
///
/// Implementations only ever append. A record is pushed into the ledger's
/// in-memory history only after `append` returned `Ok`.
pub trait HistoryLog: Debug {
    /// Append one record to durable storage
    fn append(&mut self, record: &HistoryRecord) -> Result<(), BankrollError>;
}
