//! Money amounts and the studio's rate card.

use std::{fmt, ops::Add};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Money ───────────────────────────────────────────────────────────────────

/// A non-negative dollar amount held in whole cents.
///
/// Deserialises from a decimal number (`39.99`) so rate cards read naturally
/// in configuration files.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(u64);

impl Money {
  pub const ZERO: Money = Money(0);

  pub const fn from_cents(cents: u64) -> Self { Self(cents) }

  pub fn cents(self) -> u64 { self.0 }

  /// `self * n`, saturating at the largest representable amount.
  pub fn times(self, n: u32) -> Self { Self(self.0.saturating_mul(u64::from(n))) }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money { Money(self.0.saturating_add(rhs.0)) }
}

/// Two decimal places, no currency sign.
impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
  }
}

impl TryFrom<f64> for Money {
  type Error = Error;

  fn try_from(dollars: f64) -> Result<Self, Error> {
    if !dollars.is_finite() || dollars < 0.0 {
      return Err(Error::InvalidAmount(dollars.to_string()));
    }
    let cents = (dollars * 100.0).round();
    if cents > u64::MAX as f64 {
      return Err(Error::InvalidAmount(dollars.to_string()));
    }
    Ok(Money(cents as u64))
  }
}

impl From<Money> for f64 {
  fn from(money: Money) -> f64 { money.0 as f64 / 100.0 }
}

// ─── Rates ───────────────────────────────────────────────────────────────────

/// Monthly base rates per tier plus the Basic overage policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
  pub basic_monthly:    Money,
  pub family_monthly:   Money,
  pub premium_monthly:  Money,
  /// Charged per Basic class attended beyond `included_classes`.
  pub extra_class:      Money,
  /// Classes a Basic membership may attend before overage applies.
  pub included_classes: u32,
}

impl Default for Rates {
  fn default() -> Self {
    Self {
      basic_monthly:    Money::from_cents(3999),
      family_monthly:   Money::from_cents(4999),
      premium_monthly:  Money::from_cents(5999),
      extra_class:      Money::from_cents(1000),
      included_classes: 4,
    }
  }
}
