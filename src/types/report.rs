//! Derived figures reported for an account
//!
//! These are computed on demand from a ledger's history and never persisted:
//! - [`StakeQuote`]: blinds and buy-in the bankroll can afford
//! - [`ChangeReport`]: how much the balance moved over a time window
//! - [`Period`]: the named windows shown to users

use super::money::Money;
use chrono::TimeDelta;

/// Recommended stakes for a bankroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeQuote {
    pub small_blind: Money,
    pub big_blind: Money,
    /// Table buy-in, a fixed number of big blinds
    pub buy_in: Money,
}

impl StakeQuote {
    /// Render as `small / big / buy-in`, e.g. `$0.24 / $0.48 / $48.00`
    pub fn format(&self, currency: &str) -> String {
        format!(
            "{} / {} / {}",
            self.small_blind.format(currency),
            self.big_blind.format(currency),
            self.buy_in.format(currency)
        )
    }
}

/// Direction of a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
    Unchanged,
}

/// Balance movement over a time window
///
/// The sign lives in `trend`; `amount` is always the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeReport {
    /// Absolute size of the change
    pub amount: Money,

    pub trend: Trend,

    /// Change relative to the starting balance, in whole percent (magnitude)
    ///
    /// `None` when the starting balance was zero or nothing changed.
    pub percent: Option<u64>,
}

impl ChangeReport {
    /// The change with its sign restored
    pub fn signed_amount(&self) -> Money {
        match self.trend {
            Trend::Negative => {
                Money::from_minor(-self.amount.minor_units(), self.amount.precision())
            }
            Trend::Positive | Trend::Unchanged => self.amount,
        }
    }

    /// Render as `+ $12.00 (5%)`, `- $3.50 (1%)` or `$0.00`
    pub fn format(&self, currency: &str) -> String {
        let sign = match self.trend {
            Trend::Positive => "+ ",
            Trend::Negative => "- ",
            Trend::Unchanged => "",
        };
        let percent = self
            .percent
            .map(|p| format!(" ({p}%)"))
            .unwrap_or_default();
        format!("{sign}{}{percent}", self.amount.format(currency))
    }
}

/// Named reporting windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Every period, shortest first
    pub const ALL: [Period; 5] = [
        Period::Hour,
        Period::Day,
        Period::Week,
        Period::Month,
        Period::Year,
    ];

    /// Length of the window
    ///
    /// A month is 30.44 days and a year 365.2 days, the calendar averages.
    pub fn window(self) -> TimeDelta {
        match self {
            Period::Hour => TimeDelta::hours(1),
            Period::Day => TimeDelta::days(1),
            Period::Week => TimeDelta::days(7),
            Period::Month => TimeDelta::seconds(2_630_016),
            Period::Year => TimeDelta::seconds(31_553_280),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Hour => "Last Hour",
            Period::Day => "Last Day",
            Period::Week => "Last Week",
            Period::Month => "Last Month",
            Period::Year => "Last Year",
        }
    }
}
