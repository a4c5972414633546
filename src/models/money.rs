//! Signed currency amounts held as whole cents
//!
//! Ledger input has two decimal places, so every leaf, sum and difference
//! stays exact as an integer count of cents.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An amount of money in cents; serializes as a bare integer
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

/// Rejected amount text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid amount: '{0}'")]
pub struct MoneyParseError(String);

const CURRENCY_PREFIXES: [&str; 2] = ["R$", "$"];

impl Money {
    /// ```
    /// use storebook::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Read an amount typed by a user.
    ///
    /// Takes an optional leading minus, an optional `R$` or `$` prefix,
    /// whole units and up to two significant decimals (`10`, `10.5`,
    /// `-R$10.50`, `.75`). Decimals past the second are dropped.
    pub fn parse(text: &str) -> Result<Self, MoneyParseError> {
        let reject = || MoneyParseError(text.to_string());

        let trimmed = text.trim();
        let (sign, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed),
        };
        let body = CURRENCY_PREFIXES
            .iter()
            .find_map(|prefix| body.strip_prefix(*prefix))
            .unwrap_or(body)
            .trim_start();

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(reject());
        }

        let units = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| reject())?
        };
        let hundredths = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(2)
            .fold(0, |acc, digit| acc * 10 + i64::from(digit - b'0'));

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(hundredths))
            .map(|cents| Self(sign * cents))
            .ok_or_else(reject)
    }

    /// Render with a currency symbol after the sign: `R$1234.56`, `-R$3.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, self.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let text = format!(
            "{}{}.{:02}",
            if self.0 < 0 { "-" } else { "" },
            magnitude / 100,
            magnitude % 100
        );
        f.pad(&text)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}
