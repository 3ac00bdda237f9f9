//! Fixed-point currency amounts.
//!
//! The backend reports prices and subtotals either as JSON numbers or as
//! decimal strings. Both are normalised to an integer count of paise so that
//! summing subtotals is exact.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::consts::CURRENCY_SYMBOL;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount '{0}'")]
pub struct ParseMoneyError(pub String);

/// An amount in paise (1/100 of a rupee).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
  pub const ZERO: Money = Money(0);

  pub fn from_paise(paise: i64) -> Self {
    Self(paise)
  }

  pub fn paise(self) -> i64 {
    self.0
  }

  /// The amount with two decimals and no currency symbol, e.g. `49.00`.
  pub fn plain(self) -> String {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", CURRENCY_SYMBOL, self.plain())
  }
}

impl FromStr for Money {
  type Err = ParseMoneyError;

  /// Parses `49`, `49.5`, `49.00` and `₹49.00`. Digits beyond the second
  /// decimal are rounded half away from zero.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = || ParseMoneyError(s.to_string());

    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed).trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, trimmed),
    };

    let (whole, fraction) = match digits.split_once('.') {
      Some((whole, fraction)) => (whole, fraction),
      None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
      return Err(err());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
      return Err(err());
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| err())? };

    let mut cents = 0i64;
    for (i, c) in fraction.chars().take(2).enumerate() {
      let digit = i64::from(c as u8 - b'0');
      cents += if i == 0 { digit * 10 } else { digit };
    }
    if let Some(c) = fraction.chars().nth(2)
      && c >= '5'
    {
      cents += 1;
    }

    let paise = whole.checked_mul(100).and_then(|p| p.checked_add(cents)).ok_or_else(err)?;
    Ok(Self(if negative { -paise } else { paise }))
  }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money {
    Money(self.0 + rhs.0)
  }
}

impl Mul<u32> for Money {
  type Output = Money;

  fn mul(self, rhs: u32) -> Money {
    Money(self.0 * i64::from(rhs))
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, Add::add)
  }
}

impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.plain())
  }
}

impl<'de> Deserialize<'de> for Money {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Number(serde_json::Number),
      Text(String),
    }

    let text = match Raw::deserialize(deserializer)? {
      Raw::Number(n) => n.to_string(),
      Raw::Text(s) => s,
    };
    text.parse().map_err(serde::de::Error::custom)
  }
}
