//! I/O module
//!
//! Handles the on-disk representation of a data directory.
//!
//! # Components
//!
//! - `snapshot` - JSON snapshot of account settings and the selection
//! - `history_csv` - Append-only CSV history log, one file per account
//! - `memory_log` - In-memory history log for ledgers that never touch disk

pub mod history_csv;
pub mod memory_log;
pub mod snapshot;

pub use history_csv::{read_history, CsvHistoryLog};
pub use memory_log::MemoryHistoryLog;
pub use snapshot::{Snapshot, SnapshotStore};
