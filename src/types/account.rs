//! Account configuration for the bankroll manager
//!
//! This module defines the typed settings every ledger is created with. The
//! on-disk mapping of these settings lives in [`crate::io::snapshot`]; business
//! logic only ever sees [`AccountConfig`].

use super::error::BankrollError;
use super::money::MAX_PRECISION;

/// Settings of one named bankroll
///
/// Built through [`AccountConfig::new`], which enforces that the account can
/// actually be stored and computed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Unique account name, also the stem of its history file name
    pub name: String,

    /// Currency symbol, used only for display
    pub currency: String,

    /// Number of fractional digits balances are kept at
    ///
    /// Fixed at creation. Input with more fractional digits is rejected.
    pub precision: u32,

    /// How many buy-ins the bankroll is sized to cover
    ///
    /// Always positive. Stake quotes divide the balance by this number.
    pub buy_ins: u32,
}

impl AccountConfig {
    /// Create validated account settings
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountConfig` if:
    /// - `name` is empty, starts with `.`, or contains a path separator
    /// - `precision` exceeds [`MAX_PRECISION`]
    /// - `buy_ins` is zero
    pub fn new(
        name: impl Into<String>,
        currency: impl Into<String>,
        precision: u32,
        buy_ins: u32,
    ) -> Result<Self, BankrollError> {
        let name = name.into();

        if name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\'])
            || name.chars().any(char::is_control)
        {
            return Err(BankrollError::invalid_account_config(
                &name,
                "name must be usable as a file name",
            ));
        }
        if precision > MAX_PRECISION {
            return Err(BankrollError::invalid_account_config(
                &name,
                format!("precision must be at most {MAX_PRECISION}, got {precision}"),
            ));
        }
        if buy_ins == 0 {
            return Err(BankrollError::invalid_account_config(
                &name,
                "buy_ins must be positive",
            ));
        }

        Ok(AccountConfig {
            name,
            currency: currency.into(),
            precision,
            buy_ins,
        })
    }
}
