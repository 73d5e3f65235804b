//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic, the rounding helpers the liquidity engine
//! needs, and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Cents per whole currency unit
const CENTS_PER_UNIT: i64 = 100;

/// Currency symbols accepted in front of an amount
const CURRENCY_SYMBOLS: [&str; 2] = ["₹", "$"];

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use journalme::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use journalme::models::Money;
    /// let rent = Money::from_units(10000);
    /// assert_eq!(rent.cents(), 1_000_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * CENTS_PER_UNIT)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
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

    /// Clamp negative amounts to zero
    pub fn clamp_non_negative(self) -> Self {
        self.max(Self::zero())
    }

    /// Split the amount over `parts` days, rounding up to a whole currency unit
    ///
    /// The result times `parts` always covers the original amount, so a
    /// set-aside computed this way can never under-fund an obligation.
    ///
    /// # Examples
    /// ```
    /// use journalme::models::Money;
    /// let daily = Money::from_units(10000).div_ceil_units(7);
    /// assert_eq!(daily, Money::from_units(1429));
    /// ```
    pub fn div_ceil_units(self, parts: u32) -> Self {
        debug_assert!(parts > 0, "division by zero days");
        let divisor = i64::from(parts.max(1)) * CENTS_PER_UNIT;
        Self(self.0.div_euclid(divisor) * CENTS_PER_UNIT + ceil_remainder(self.0, divisor))
    }

    /// Split the amount over `parts`, rounding down to the cent
    ///
    /// Used for allowances: rounding down never permits more spending than
    /// the amount actually available.
    pub fn div_floor(self, parts: u32) -> Self {
        debug_assert!(parts > 0, "division by zero");
        Self(self.0.div_euclid(i64::from(parts.max(1))))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "₹-10.50", "-$10.50", "1,250", "10".
    /// Anything else, including more than two decimal places, is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(input.to_string());

        // The sign may sit on either side of the currency symbol
        let (mut negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let rest = CURRENCY_SYMBOLS
            .iter()
            .find_map(|symbol| rest.strip_prefix(symbol))
            .unwrap_or(rest);
        let rest = match rest.strip_prefix('-') {
            Some(unsigned) if !negative => {
                negative = true;
                unsigned
            }
            Some(_) => return Err(invalid()),
            None => rest,
        };

        if !rest.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
            return Err(invalid());
        }
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let (units_str, cents_str) = match cleaned.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (cleaned.as_str(), ""),
        };
        if (units_str.is_empty() && cents_str.is_empty())
            || cents_str.len() > 2
            || cents_str.contains('.')
        {
            return Err(invalid());
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

/// Extra whole units needed to round `value / divisor` up, in cents
fn ceil_remainder(value: i64, divisor: i64) -> i64 {
    if value.rem_euclid(divisor) == 0 {
        0
    } else {
        CENTS_PER_UNIT
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
