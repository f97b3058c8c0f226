//! In-memory history log
//!
//! Keeps appended records in a shared vector instead of a file. Clones share
//! the same storage, so a caller can keep a handle on what a ledger wrote.

use crate::core::traits::HistoryLog;
use crate::types::{BankrollError, HistoryRecord};
use std::cell::RefCell;
use std::rc::Rc;

/// History log backed by memory
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryLog {
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl MemoryHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far, in append order
    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.borrow().clone()
    }
}

impl HistoryLog for MemoryHistoryLog {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), BankrollError> {
        self.records.borrow_mut().push(*record);
        Ok(())
    }
}
