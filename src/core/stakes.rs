//! Stake sizing
//!
//! Derives the blinds and table buy-in a bankroll can afford. A bankroll is
//! split into `buy_ins` equal buy-ins, a buy-in is
//! [`BIG_BLINDS_PER_BUY_IN`] big blinds, and a big blind is
//! [`SMALL_BLINDS_PER_BIG_BLIND`] small blinds. The small blind is therefore
//! `balance / buy_ins / 200`, truncated toward zero at the balance's precision,
//! and the larger figures are built up from it so they stay in exact ratio.

use crate::types::{BankrollError, Money, StakeQuote};

/// Big blinds in one standard buy-in
pub const BIG_BLINDS_PER_BUY_IN: i128 = 100;

/// Small blinds in one big blind
pub const SMALL_BLINDS_PER_BIG_BLIND: i128 = 2;

/// Quote stakes for `balance` spread over `buy_ins` buy-ins
///
/// # Arguments
///
/// * `balance` - The current bankroll balance
/// * `buy_ins` - Number of buy-ins the bankroll covers (must be positive)
///
/// # Returns
///
/// * `Ok(StakeQuote)` - small blind, big blind and buy-in at the balance's precision
/// * `Err(BankrollError)` - on a zero `buy_ins` or arithmetic overflow
pub fn quote(balance: Money, buy_ins: u32) -> Result<StakeQuote, BankrollError> {
    let divisor = i128::from(buy_ins) * BIG_BLINDS_PER_BUY_IN * SMALL_BLINDS_PER_BIG_BLIND;

    let small_blind = balance.checked_div_trunc(divisor)?;
    let big_blind = small_blind.checked_mul(SMALL_BLINDS_PER_BIG_BLIND)?;
    let buy_in = big_blind.checked_mul(BIG_BLINDS_PER_BUY_IN)?;

    Ok(StakeQuote {
        small_blind,
        big_blind,
        buy_in,
    })
}
