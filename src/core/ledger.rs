//! Per-account ledger
//!
//! This module provides the [`Ledger`], which owns one account's settings and
//! its append-only balance history.
//!
//! The Ledger is responsible for:
//! - Validating user input against the account precision
//! - Appending absolute balances and transaction results to history
//! - Persisting each append through its [`HistoryLog`] before keeping it in memory
//! - Answering stake and change-over-time queries from in-memory history
//!
//! There is no undo. A mistaken entry is corrected by appending another one.

use crate::core::stakes;
use crate::core::traits::HistoryLog;
use crate::io::memory_log::MemoryHistoryLog;
use crate::types::{
    AccountConfig, BankrollError, ChangeReport, HistoryRecord, Money, Period, StakeQuote, Trend,
};
use chrono::{DateTime, TimeDelta, Utc};
use log::info;

/// One bankroll: settings, balance history and its durable log
#[derive(Debug)]
pub struct Ledger {
    config: AccountConfig,
    /// Ordered by append time, oldest first
    history: Vec<HistoryRecord>,
    log: Box<dyn HistoryLog>,
}

impl Ledger {
    /// Create a ledger with an empty history
    pub fn new(config: AccountConfig, log: Box<dyn HistoryLog>) -> Self {
        Self::with_history(config, Vec::new(), log)
    }

    /// Create a ledger from already replayed history
    ///
    /// The records are trusted as given: they are expected at the account's
    /// precision and in non-decreasing timestamp order.
    pub fn with_history(
        config: AccountConfig,
        history: Vec<HistoryRecord>,
        log: Box<dyn HistoryLog>,
    ) -> Self {
        Ledger {
            config,
            history,
            log,
        }
    }

    /// Create a ledger whose history is only kept in memory
    pub fn in_memory(config: AccountConfig) -> Self {
        Self::new(config, Box::new(MemoryHistoryLog::new()))
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// The latest recorded balance, or `None` if nothing was ever recorded
    ///
    /// `None` is distinct from a zero balance.
    pub fn current_balance(&self) -> Option<Money> {
        self.history.last().map(|record| record.balance)
    }

    /// Overwrite the balance with an absolute amount, stamped with the current time
    ///
    /// See [`Ledger::set_balance_at`].
    pub fn set_balance(&mut self, text: &str) -> Result<Money, BankrollError> {
        self.set_balance_at(text, Utc::now())
    }

    /// Overwrite the balance with an absolute amount
    ///
    /// # Arguments
    ///
    /// * `text` - Decimal literal with at most `precision` fractional digits
    /// * `now` - Timestamp of the new record (sub-seconds are dropped)
    ///
    /// # Returns
    ///
    /// * `Ok(Money)` - The new balance
    /// * `Err(BankrollError)` - `MalformedNumber`, `PrecisionExceeded`, or a write failure
    ///
    /// On error, history is left untouched.
    pub fn set_balance_at(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Money, BankrollError> {
        let balance = self.parse_amount(text)?;
        info!("{}: set balance {}", self.config.name, balance);
        self.append(HistoryRecord::new(now, balance))?;
        Ok(balance)
    }

    /// Add a signed delta to the balance, stamped with the current time
    ///
    /// See [`Ledger::apply_transaction_at`].
    pub fn apply_transaction(&mut self, text: &str) -> Result<Money, BankrollError> {
        self.apply_transaction_at(text, Utc::now())
    }

    /// Add a signed delta to the balance
    ///
    /// An account without a balance is treated as holding zero. Fails the same
    /// way as [`Ledger::set_balance_at`], plus `ArithmeticOverflow`.
    pub fn apply_transaction_at(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Money, BankrollError> {
        let delta = self.parse_amount(text)?;
        let current = self
            .current_balance()
            .unwrap_or_else(|| Money::zero(self.config.precision));
        let balance = current.checked_add(&delta)?;

        info!(
            "{}: transaction {} ({} -> {})",
            self.config.name, delta, current, balance
        );
        self.append(HistoryRecord::new(now, balance))?;
        Ok(balance)
    }

    /// Stakes the current balance can support, or `None` without a balance
    pub fn stakes(&self) -> Result<Option<StakeQuote>, BankrollError> {
        self.current_balance()
            .map(|balance| stakes::quote(balance, self.config.buy_ins))
            .transpose()
    }

    /// Balance change over the trailing `window`, measured from now
    pub fn change_over(&self, window: TimeDelta) -> Result<Option<ChangeReport>, BankrollError> {
        self.change_over_at(window, Utc::now())
    }

    /// Balance change over one of the named periods, measured from now
    pub fn change(&self, period: Period) -> Result<Option<ChangeReport>, BankrollError> {
        self.change_over(period.window())
    }

    /// Balance change over the `window` ending at `now`
    ///
    /// The starting balance is the most recent record strictly older than
    /// `now - window`. If every record is newer than that, the account is
    /// treated as having started from zero. Returns `None` when the account
    /// has no balance at all.
    pub fn change_over_at(
        &self,
        window: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<Option<ChangeReport>, BankrollError> {
        let Some(current) = self.current_balance() else {
            return Ok(None);
        };

        let cutoff = now.checked_sub_signed(window);
        let before = self
            .history
            .iter()
            .rev()
            .find(|record| cutoff.is_some_and(|cutoff| record.timestamp < cutoff))
            .map(|record| record.balance)
            .unwrap_or_else(|| Money::zero(self.config.precision));

        let delta = current.checked_sub(&before)?;
        let trend = if delta.is_zero() {
            Trend::Unchanged
        } else if delta.is_negative() {
            Trend::Negative
        } else {
            Trend::Positive
        };

        let percent = if before.is_zero() || delta.is_zero() {
            None
        } else {
            Some(percent_of(delta, before)?)
        };

        Ok(Some(ChangeReport {
            amount: delta.checked_abs()?,
            trend,
            percent,
        }))
    }

    fn parse_amount(&self, text: &str) -> Result<Money, BankrollError> {
        Money::parse(text)?.quantize(self.config.precision)
    }

    fn append(&mut self, record: HistoryRecord) -> Result<(), BankrollError> {
        self.log.append(&record)?;
        self.history.push(record);
        Ok(())
    }
}

/// `100 * |delta| / |base|` rounded half away from zero
fn percent_of(delta: Money, base: Money) -> Result<u64, BankrollError> {
    let delta = delta.minor_units().unsigned_abs();
    let base = base.minor_units().unsigned_abs();

    let rounded = delta
        .checked_mul(200)
        .and_then(|n| n.checked_add(base))
        .zip(base.checked_mul(2))
        .map(|(numerator, denominator)| numerator / denominator)
        .ok_or_else(|| BankrollError::arithmetic_overflow("percentage"))?;

    Ok(u64::try_from(rounded).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[derive(Debug)]
    struct FailingLog;

    impl HistoryLog for FailingLog {
        fn append(&mut self, _record: &HistoryRecord) -> Result<(), BankrollError> {
            Err(BankrollError::IoError {
                message: "disk full".to_string(),
            })
        }
    }

    fn main_config() -> AccountConfig {
        AccountConfig::new("main", "$", 2, 30).unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn ledger_with(records: &[(i64, i128)]) -> Ledger {
        // (seconds before noon, minor units)
        let history = records
            .iter()
            .map(|&(ago, minor)| {
                HistoryRecord::new(noon() - TimeDelta::seconds(ago), Money::from_minor(minor, 2))
            })
            .collect();
        Ledger::with_history(main_config(), history, Box::new(MemoryHistoryLog::new()))
    }

    #[test]
    fn test_new_ledger_has_no_balance() {
        let ledger = Ledger::in_memory(main_config());
        assert_eq!(ledger.current_balance(), None);
        assert_eq!(ledger.stakes().unwrap(), None);
        assert_eq!(ledger.change(Period::Day).unwrap(), None);
    }

    #[test]
    fn test_scenario_set_then_transaction_then_stakes() {
        let mut ledger = Ledger::in_memory(main_config());

        let balance = ledger.set_balance("1500").unwrap();
        assert_eq!(balance.format("$"), "$1,500.00");

        ledger.apply_transaction("-50.25").unwrap();
        let balance = ledger.current_balance().unwrap();
        assert_eq!(balance.format("$"), "$1,449.75");

        let quote = ledger.stakes().unwrap().unwrap();
        assert_eq!(quote.format("$"), "$0.24 / $0.48 / $48.00");
    }

    #[test]
    fn test_set_balance_appends_to_log_and_history() {
        let log = MemoryHistoryLog::new();
        let mut ledger = Ledger::new(main_config(), Box::new(log.clone()));

        ledger.set_balance_at("100", noon()).unwrap();

        let expected = HistoryRecord::new(noon(), Money::from_minor(10000, 2));
        assert_eq!(ledger.history(), &[expected]);
        assert_eq!(log.records(), vec![expected]);
    }

    #[test]
    fn test_set_balance_is_an_absolute_overwrite() {
        let mut ledger = ledger_with(&[(60, 50000)]);
        ledger.set_balance_at("20", noon()).unwrap();
        assert_eq!(ledger.current_balance(), Some(Money::from_minor(2000, 2)));
        assert_eq!(ledger.history().len(), 2);
    }

    #[rstest]
    #[case::over_precise("10.999")]
    #[case::malformed("ten")]
    #[case::grouped("1,000")]
    fn test_rejected_input_leaves_empty_ledger_unset(#[case] text: &str) {
        let log = MemoryHistoryLog::new();
        let mut ledger = Ledger::new(main_config(), Box::new(log.clone()));

        let err = ledger.set_balance(text).unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(ledger.current_balance(), None);
        assert!(log.records().is_empty());
    }

    #[test]
    fn test_over_precise_input_is_precision_exceeded() {
        let mut ledger = ledger_with(&[(60, 50000)]);

        let set = ledger.set_balance("10.999").unwrap_err();
        let add = ledger.apply_transaction("-0.001").unwrap_err();

        assert!(matches!(set, BankrollError::PrecisionExceeded { precision: 2, .. }));
        assert!(matches!(add, BankrollError::PrecisionExceeded { precision: 2, .. }));
        assert_eq!(ledger.current_balance(), Some(Money::from_minor(50000, 2)));
        assert_eq!(ledger.history().len(), 1);
    }

    #[test]
    fn test_write_failure_leaves_history_unchanged() {
        let mut ledger = Ledger::new(main_config(), Box::new(FailingLog));

        let err = ledger.set_balance("100").unwrap_err();

        assert!(matches!(err, BankrollError::IoError { .. }));
        assert_eq!(ledger.current_balance(), None);
    }

    #[test]
    fn test_transaction_on_empty_ledger_starts_from_zero() {
        let mut ledger = Ledger::in_memory(main_config());
        let balance = ledger.apply_transaction("-12.5").unwrap();
        assert_eq!(balance, Money::from_minor(-1250, 2));
    }

    #[rstest]
    #[case("1500", "-50.25", "20")]
    #[case("0", "0.01", "-0.01")]
    #[case("99.99", "-100", "1000000.5")]
    fn test_transactions_match_single_set_balance(
        #[case] start: &str,
        #[case] d1: &str,
        #[case] d2: &str,
    ) {
        let mut stepwise = Ledger::in_memory(main_config());
        stepwise.set_balance(start).unwrap();
        stepwise.apply_transaction(d1).unwrap();
        stepwise.apply_transaction(d2).unwrap();

        let total = [start, d1, d2]
            .iter()
            .map(|t| Money::parse(t).unwrap().quantize(2).unwrap())
            .try_fold(Money::zero(2), |acc, m| acc.checked_add(&m))
            .unwrap();
        let mut direct = Ledger::in_memory(main_config());
        direct.set_balance(&total.to_string()).unwrap();

        assert_eq!(stepwise.current_balance(), direct.current_balance());
    }

    #[test]
    fn test_change_uses_last_record_before_cutoff() {
        // 2h ago: 100.00, 30m ago: 150.00; window 1h
        let ledger = ledger_with(&[(7200, 10000), (1800, 15000)]);

        let report = ledger
            .change_over_at(TimeDelta::hours(1), noon())
            .unwrap()
            .unwrap();

        assert_eq!(report.amount, Money::from_minor(5000, 2));
        assert_eq!(report.trend, Trend::Positive);
        assert_eq!(report.percent, Some(50));
    }

    #[test]
    fn test_change_picks_the_most_recent_old_record() {
        let ledger = ledger_with(&[(9000, 40000), (7200, 20000), (600, 15000)]);

        let report = ledger
            .change_over_at(TimeDelta::hours(1), noon())
            .unwrap()
            .unwrap();

        assert_eq!(report.signed_amount(), Money::from_minor(-5000, 2));
        assert_eq!(report.trend, Trend::Negative);
        assert_eq!(report.percent, Some(25));
    }

    #[test]
    fn test_change_without_old_record_starts_from_zero() {
        let ledger = ledger_with(&[(1800, 10000), (600, 12000)]);

        let report = ledger
            .change_over_at(TimeDelta::hours(1), noon())
            .unwrap()
            .unwrap();

        assert_eq!(report.amount, Money::from_minor(12000, 2));
        assert_eq!(report.trend, Trend::Positive);
        assert_eq!(report.percent, None);
    }

    #[test]
    fn test_change_cutoff_is_exclusive() {
        // A record exactly at the cutoff is not older than it
        let ledger = ledger_with(&[(3600, 10000), (60, 11000)]);

        let report = ledger
            .change_over_at(TimeDelta::hours(1), noon())
            .unwrap()
            .unwrap();

        assert_eq!(report.amount, Money::from_minor(11000, 2));
        assert_eq!(report.percent, None);
    }

    #[test]
    fn test_unchanged_balance_has_no_percent() {
        let ledger = ledger_with(&[(7200, 10000), (60, 10000)]);

        let report = ledger
            .change_over_at(TimeDelta::hours(1), noon())
            .unwrap()
            .unwrap();

        assert_eq!(report.trend, Trend::Unchanged);
        assert!(report.amount.is_zero());
        assert_eq!(report.percent, None);
    }

    #[rstest]
    #[case::rounds_down(10000, 10149, 1)]
    #[case::rounds_half_up(10000, 10150, 2)]
    #[case::loss(10000, 6650, 34)]
    #[case::negative_base(-10000, -5000, 50)]
    #[case::large(100, 100000, 99900)]
    fn test_change_percent_rounding(
        #[case] before: i128,
        #[case] after: i128,
        #[case] percent: u64,
    ) {
        let ledger = ledger_with(&[(7200, before), (60, after)]);

        let report = ledger
            .change_over_at(TimeDelta::hours(1), noon())
            .unwrap()
            .unwrap();

        assert_eq!(report.percent, Some(percent));
    }
}
