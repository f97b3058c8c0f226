//! Text rendering of directory state
//!
//! Pure functions turning engine read accessors into terminal output. Nothing
//! here mutates state.

use crate::core::{Directory, Ledger};
use crate::types::{BankrollError, Period};

/// Shown where an account has no balance yet
pub const NO_BALANCE: &str = "—";

/// Strip `,` grouping separators from user-typed amounts
///
/// The engine only accepts plain literals, so `1,500.25` becomes `1500.25`.
pub fn normalize_amount(text: &str) -> String {
    text.chars().filter(|&c| c != ',').collect()
}

/// One account name per line, the selected one marked with `*`
pub fn render_listing(directory: &Directory) -> String {
    directory
        .listing()
        .into_iter()
        .map(|name| {
            let marker = if name == directory.selected() { '*' } else { ' ' };
            format!("{marker} {name}\n")
        })
        .collect()
}

/// Balance, stakes and every reporting period of the selected account
pub fn render_overview(directory: &Directory) -> Result<String, BankrollError> {
    let ledger = directory.selected_ledger()?;
    let currency = &ledger.config().currency;

    let balance = ledger
        .current_balance()
        .map_or_else(|| NO_BALANCE.to_string(), |b| b.format(currency));
    let stakes = ledger
        .stakes()?
        .map_or_else(|| NO_BALANCE.to_string(), |q| q.format(currency));

    let mut lines = vec![
        ("Account", ledger.name().to_string()),
        ("Balance", balance),
        ("Stakes", stakes),
    ];
    for period in Period::ALL {
        let change = ledger
            .change(period)?
            .map_or_else(|| NO_BALANCE.to_string(), |c| c.format(currency));
        lines.push((period.label(), change));
    }

    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    Ok(lines
        .into_iter()
        .map(|(label, value)| format!("{:>width$}: {value}\n", label))
        .collect())
}

/// History records, oldest first, optionally only the last `limit`
pub fn render_history(ledger: &Ledger, limit: Option<usize>) -> String {
    let history = ledger.history();
    let skip = limit.map_or(0, |n| history.len().saturating_sub(n));
    let currency = &ledger.config().currency;

    history[skip..]
        .iter()
        .map(|record| {
            format!(
                "{}  {}\n",
                record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                record.balance.format(currency)
            )
        })
        .collect()
}
