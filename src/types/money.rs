//! Fixed-precision monetary amounts
//!
//! A [`Money`] value is an integer count of minor units together with the number
//! of fractional digits (`precision`) those units represent. `1449.75` at
//! precision 2 is stored as `144975`. Binary floating point is never involved.
//!
//! Quantization always truncates toward zero. [`Money::quantize`] refuses to drop
//! digits, so over-precise user input is rejected rather than rounded, while
//! [`Money::truncate`] drops them silently for derived values.

use super::error::BankrollError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest precision an account may be configured with
pub const MAX_PRECISION: u32 = 18;

/// An exact decimal amount stored as scaled integer minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    minor: i128,
    precision: u32,
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

impl Money {
    /// Zero at the given precision
    pub fn zero(precision: u32) -> Self {
        Money {
            minor: 0,
            precision,
        }
    }

    /// Build an amount from minor units, e.g. `Money::from_minor(144975, 2)` is `1449.75`
    pub fn from_minor(minor: i128, precision: u32) -> Self {
        Money { minor, precision }
    }

    pub fn minor_units(&self) -> i128 {
        self.minor
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    pub fn is_negative(&self) -> bool {
        self.minor < 0
    }

    /// Parse a plain decimal literal
    ///
    /// Accepts surrounding whitespace, an optional sign, digits and at most one
    /// decimal point. The result keeps the literal's own scale: `"10.50"` parses
    /// to precision 2, `"1500"` to precision 0. Trailing fractional zeros that
    /// would not fit in 128-bit minor units are dropped instead.
    ///
    /// # Errors
    ///
    /// - `MalformedNumber` for anything else (exponents, grouping separators, empty text)
    /// - `ArithmeticOverflow` if the significant digits do not fit in 128-bit minor units
    pub fn parse(text: &str) -> Result<Money, BankrollError> {
        let trimmed = text.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty())
            || !all_digits(integer)
            || !all_digits(fraction)
        {
            return Err(BankrollError::malformed_number(text));
        }

        let significant = fraction.trim_end_matches('0');
        let precision = u32::try_from(significant.len())
            .map_err(|_| BankrollError::arithmetic_overflow("parse"))?;
        let mut minor: i128 = 0;
        for digit in integer.bytes().chain(significant.bytes()) {
            minor = minor
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or_else(|| BankrollError::arithmetic_overflow("parse"))?;
        }
        let value = Money {
            minor: if negative { -minor } else { minor },
            precision,
        };

        // Trailing zeros carry scale but no value; keep them only while they fit
        Ok(u32::try_from(fraction.len())
            .ok()
            .and_then(|scale| value.rescale_up(scale).ok())
            .unwrap_or(value))
    }

    /// Re-express this amount with `precision` fractional digits without losing value
    ///
    /// # Errors
    ///
    /// - `PrecisionExceeded` if truncating to `precision` would change the value
    /// - `ArithmeticOverflow` if widening the scale does not fit
    pub fn quantize(&self, precision: u32) -> Result<Money, BankrollError> {
        if precision >= self.precision {
            return self.rescale_up(precision);
        }
        let exact = match pow10(self.precision - precision) {
            Some(factor) => self.minor % factor == 0,
            None => self.minor == 0,
        };
        if !exact {
            return Err(BankrollError::precision_exceeded(self.to_string(), precision));
        }
        self.truncate(precision)
    }

    /// Re-express this amount with `precision` fractional digits, truncating toward zero
    pub fn truncate(&self, precision: u32) -> Result<Money, BankrollError> {
        if precision >= self.precision {
            return self.rescale_up(precision);
        }
        let minor = match pow10(self.precision - precision) {
            Some(factor) => self.minor / factor,
            None => 0,
        };
        Ok(Money { minor, precision })
    }

    fn rescale_up(&self, precision: u32) -> Result<Money, BankrollError> {
        let minor = pow10(precision - self.precision)
            .and_then(|factor| self.minor.checked_mul(factor))
            .ok_or_else(|| BankrollError::arithmetic_overflow("rescale"))?;
        Ok(Money { minor, precision })
    }

    fn same_precision(&self, other: &Money) -> Result<(), BankrollError> {
        if self.precision != other.precision {
            return Err(BankrollError::PrecisionMismatch {
                left: self.precision,
                right: other.precision,
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, BankrollError> {
        self.same_precision(other)?;
        let minor = self
            .minor
            .checked_add(other.minor)
            .ok_or_else(|| BankrollError::arithmetic_overflow("addition"))?;
        Ok(Money { minor, ..*self })
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money, BankrollError> {
        self.same_precision(other)?;
        let minor = self
            .minor
            .checked_sub(other.minor)
            .ok_or_else(|| BankrollError::arithmetic_overflow("subtraction"))?;
        Ok(Money { minor, ..*self })
    }

    /// Multiply by an integer factor at the same scale
    pub fn checked_mul(&self, factor: i128) -> Result<Money, BankrollError> {
        let minor = self
            .minor
            .checked_mul(factor)
            .ok_or_else(|| BankrollError::arithmetic_overflow("multiplication"))?;
        Ok(Money { minor, ..*self })
    }

    /// Divide by an integer, truncating the result toward zero at the same scale
    pub fn checked_div_trunc(&self, divisor: i128) -> Result<Money, BankrollError> {
        let minor = self
            .minor
            .checked_div(divisor)
            .ok_or_else(|| BankrollError::arithmetic_overflow("division"))?;
        Ok(Money { minor, ..*self })
    }

    pub fn checked_abs(&self) -> Result<Money, BankrollError> {
        let minor = self
            .minor
            .checked_abs()
            .ok_or_else(|| BankrollError::arithmetic_overflow("absolute value"))?;
        Ok(Money { minor, ..*self })
    }

    /// Split the magnitude into integer and zero-padded fractional digits
    fn digits(&self) -> (String, String) {
        let precision = self.precision as usize;
        let mut digits = self.minor.unsigned_abs().to_string();
        if digits.len() <= precision {
            digits = format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits);
        }
        let fraction = digits.split_off(digits.len() - precision);
        (digits, fraction)
    }

    /// Render for display: sign, currency symbol, grouped integer part, fraction
    ///
    /// ```
    /// use bankroll_manager::Money;
    ///
    /// assert_eq!(Money::from_minor(144975, 2).format("$"), "$1,449.75");
    /// assert_eq!(Money::from_minor(-5025, 2).format("$"), "-$50.25");
    /// ```
    pub fn format(&self, currency: &str) -> String {
        let (integer, fraction) = self.digits();
        let sign = if self.is_negative() { "-" } else { "" };
        let integer = group_thousands(&integer);
        if fraction.is_empty() {
            format!("{sign}{currency}{integer}")
        } else {
            format!("{sign}{currency}{integer}.{fraction}")
        }
    }
}

/// Insert `,` between every group of three integer digits
fn group_thousands(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        result.push(ch);
        let remaining = digits.len() - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            result.push(',');
        }
    }
    result
}

/// Canonical machine form, as written to history files: `-1449.75`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (integer, fraction) = self.digits();
        if self.is_negative() {
            f.write_str("-")?;
        }
        if fraction.is_empty() {
            write!(f, "{integer}")
        } else {
            write!(f, "{integer}.{fraction}")
        }
    }
}

impl FromStr for Money {
    type Err = BankrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

// Amounts of different precision are unordered
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.precision == other.precision).then(|| self.minor.cmp(&other.minor))
    }
}
