//! Error types for the bankroll manager
//!
//! This module defines every error the bookkeeping engine can report.
//! Errors carry enough context to be shown to a user as-is.
//!
//! # Error Categories
//!
//! - **Input Errors**: malformed numbers, amounts more precise than the account
//! - **Directory Errors**: unknown accounts, a selection pointing nowhere
//! - **Load Errors**: corrupt history rows, an unreadable snapshot, bad account settings
//! - **Arithmetic Errors**: overflow, mixing amounts of different precision
//! - **File I/O Errors**: permission denied, disk full, etc.

use thiserror::Error;

/// Main error type for the bankroll manager
///
/// Only [`MalformedNumber`](BankrollError::MalformedNumber) and
/// [`PrecisionExceeded`](BankrollError::PrecisionExceeded) are recoverable:
/// the caller is expected to ask for new input, and no state was changed.
/// Every other variant is fatal to the operation that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankrollError {
    /// Input is not a plain decimal literal
    #[error("Malformed number '{input}'")]
    MalformedNumber {
        /// The rejected text
        input: String,
    },

    /// Input carries more fractional digits than the account supports
    #[error("Amount '{input}' exceeds the account precision of {precision} decimal places")]
    PrecisionExceeded {
        /// The rejected text or value
        input: String,
        /// Number of fractional digits the account supports
        precision: u32,
    },

    /// No account with this name exists in the directory
    #[error("Unknown account '{name}'")]
    UnknownAccount {
        /// The name that was looked up
        name: String,
    },

    /// The persisted selection names an account that is not declared
    #[error("Selected account '{selected}' is not declared in the snapshot")]
    InconsistentSelection {
        /// The persisted selected name
        selected: String,
    },

    /// A history file row could not be replayed
    #[error("Corrupt history row for account '{account}' at line {line}: {message}")]
    CorruptHistoryRow {
        /// Account whose history file is corrupt
        account: String,
        /// 1-based line number in the history file
        line: u64,
        /// What was wrong with the row
        message: String,
    },

    /// Two amounts of different precision were combined
    #[error("Precision mismatch: {left} vs {right} decimal places")]
    PrecisionMismatch {
        /// Precision of the left operand
        left: u32,
        /// Precision of the right operand
        right: u32,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// An account entry in the snapshot is not usable
    #[error("Invalid configuration for account '{account}': {reason}")]
    InvalidAccountConfig {
        /// Account name as found in the snapshot
        account: String,
        /// Why the entry was rejected
        reason: String,
    },

    /// The snapshot file is not valid JSON or has the wrong shape
    #[error("Snapshot format error in {path}: {message}")]
    SnapshotFormat {
        /// Path of the snapshot file
        path: String,
        /// Description of the format error
        message: String,
    },

    /// A snapshot already exists where a new directory was requested
    #[error("Data directory already initialized: {path}")]
    AlreadyInitialized {
        /// Path of the existing snapshot
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to BankrollError
impl From<std::io::Error> for BankrollError {
    fn from(error: std::io::Error) -> Self {
        BankrollError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankrollError {
    /// Whether the caller can simply ask for new input and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BankrollError::MalformedNumber { .. } | BankrollError::PrecisionExceeded { .. }
        )
    }

    /// Create a MalformedNumber error
    pub fn malformed_number(input: &str) -> Self {
        BankrollError::MalformedNumber {
            input: input.to_string(),
        }
    }

    /// Create a PrecisionExceeded error
    pub fn precision_exceeded(input: impl Into<String>, precision: u32) -> Self {
        BankrollError::PrecisionExceeded {
            input: input.into(),
            precision,
        }
    }

    /// Create an UnknownAccount error
    pub fn unknown_account(name: &str) -> Self {
        BankrollError::UnknownAccount {
            name: name.to_string(),
        }
    }

    /// Create an InconsistentSelection error
    pub fn inconsistent_selection(selected: &str) -> Self {
        BankrollError::InconsistentSelection {
            selected: selected.to_string(),
        }
    }

    /// Create a CorruptHistoryRow error
    pub fn corrupt_history_row(account: &str, line: u64, message: impl Into<String>) -> Self {
        BankrollError::CorruptHistoryRow {
            account: account.to_string(),
            line,
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        BankrollError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidAccountConfig error
    pub fn invalid_account_config(account: &str, reason: impl Into<String>) -> Self {
        BankrollError::InvalidAccountConfig {
            account: account.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a SnapshotFormat error
    pub fn snapshot_format(path: &std::path::Path, message: impl Into<String>) -> Self {
        BankrollError::SnapshotFormat {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create an IoError that names the file involved
    pub fn io_at(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        BankrollError::IoError {
            message: format!("{}: {}", path.display(), error),
        }
    }
}
