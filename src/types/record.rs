//! History records
//!
//! A ledger's history is a sequence of balance snapshots. Each snapshot is an
//! absolute balance, not a delta, stamped with the second it was recorded.

use super::money::Money;
use chrono::{DateTime, SubsecRound, Utc};

/// One balance snapshot in an account's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRecord {
    /// When the balance was recorded, truncated to whole seconds
    pub timestamp: DateTime<Utc>,

    /// The account balance at that instant, at the account's precision
    pub balance: Money,
}

impl HistoryRecord {
    /// Create a record, dropping any sub-second part of `timestamp`
    pub fn new(timestamp: DateTime<Utc>, balance: Money) -> Self {
        HistoryRecord {
            timestamp: timestamp.trunc_subsecs(0),
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_new_truncates_to_whole_seconds() {
        let precise = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 15)
            .unwrap()
            .with_nanosecond(987_654_321)
            .unwrap();

        let record = HistoryRecord::new(precise, Money::from_minor(100, 2));

        assert_eq!(record.timestamp.nanosecond(), 0);
        assert_eq!(record.timestamp.second(), 15);
        assert_eq!(record.balance, Money::from_minor(100, 2));
    }
}
