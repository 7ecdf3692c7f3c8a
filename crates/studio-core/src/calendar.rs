//! Calendar dates, validation, and month arithmetic.
//!
//! A [`CalendarDate`] is a plain `(month, day, year)` triple. Construction
//! never validates, so a date such as `2/30/2001` can exist; callers check
//! [`CalendarDate::is_valid`] before relying on one. Every check that depends
//! on "now" takes `today` explicitly, usually supplied by a [`Clock`].

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Earliest year accepted by [`CalendarDate::is_valid`].
pub const MIN_YEAR: i32 = 1900;

// ─── CalendarDate ────────────────────────────────────────────────────────────

/// An immutable `(month, day, year)` triple, written `M/D/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
  month: u32,
  day:   u32,
  year:  i32,
}

impl CalendarDate {
  pub const fn new(month: u32, day: u32, year: i32) -> Self {
    Self { month, day, year }
  }

  pub fn month(&self) -> u32 { self.month }

  pub fn day(&self) -> u32 { self.day }

  pub fn year(&self) -> i32 { self.year }

  /// Today's date according to the local wall clock.
  pub fn today() -> Self { Local::now().date_naive().into() }

  /// Whether this is a real calendar date between January 1, 1900 and
  /// `today`, inclusive.
  pub fn is_valid(&self, today: CalendarDate) -> bool {
    if self.year < MIN_YEAR || self.year > today.year {
      return false;
    }
    if self.day < 1 || self.day > days_in_month(self.month, self.year) {
      return false;
    }
    if self.year == today.year {
      return match self.month.cmp(&today.month) {
        Ordering::Less => true,
        Ordering::Equal => self.day <= today.day,
        Ordering::Greater => false,
      };
    }
    true
  }

  /// Whether this date falls strictly after `today`.
  pub fn is_future(&self, today: CalendarDate) -> bool { *self > today }

  /// Whether someone born on this date is at least `min_years` old.
  ///
  /// The comparison is month-granular: in the year someone turns
  /// `min_years`, they count as old enough from the first day of their birth
  /// month.
  pub fn is_eligible_by_age(&self, today: CalendarDate, min_years: u32) -> bool {
    let years = i64::from(today.year) - i64::from(self.year);
    let min_years = i64::from(min_years);
    years > min_years || (years == min_years && self.month <= today.month)
  }

  /// Add `months` calendar months, clipping the day to the length of the
  /// target month (Jan 31 + 1 month is the last day of February).
  pub fn add_months(&self, months: u32) -> Self {
    let index = i64::from(self.year) * 12 + i64::from(self.month) - 1
      + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).unwrap_or(i32::MAX);
    // rem_euclid(12) is always in 0..12
    let month = index.rem_euclid(12) as u32 + 1;
    let day = self.day.min(days_in_month(month, year));
    Self { month, day, year }
  }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
  year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`; `0` when `month` is not in `1..=12`.
pub fn days_in_month(month: u32, year: i32) -> u32 {
  match month {
    1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
    4 | 6 | 9 | 11 => 30,
    2 if is_leap_year(year) => 29,
    2 => 28,
    _ => 0,
  }
}

impl Ord for CalendarDate {
  fn cmp(&self, other: &Self) -> Ordering {
    (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
  }
}

impl PartialOrd for CalendarDate {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl fmt::Display for CalendarDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}/{}", self.month, self.day, self.year)
  }
}

impl FromStr for CalendarDate {
  type Err = Error;

  /// Parse `M/D/YYYY`. Leading zeros are accepted; range checks are not
  /// performed here.
  fn from_str(s: &str) -> Result<Self> {
    let malformed = || Error::MalformedDate(s.to_string());
    let fields: Vec<&str> = s.trim().split('/').collect();
    let [month, day, year] = fields.as_slice() else {
      return Err(malformed());
    };
    let month = numeric_field(month).ok_or_else(malformed)?;
    let day = numeric_field(day).ok_or_else(malformed)?;
    let year = numeric_field(year)
      .and_then(|y| i32::try_from(y).ok())
      .ok_or_else(malformed)?;
    Ok(Self::new(month, day, year))
  }
}

/// Digits only; no sign, no whitespace.
fn numeric_field(s: &str) -> Option<u32> {
  if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  s.parse().ok()
}

impl TryFrom<String> for CalendarDate {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { value.parse() }
}

impl From<CalendarDate> for String {
  fn from(date: CalendarDate) -> Self { date.to_string() }
}

impl From<NaiveDate> for CalendarDate {
  fn from(date: NaiveDate) -> Self {
    Self::new(date.month(), date.day(), date.year())
  }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of "today" for every date-dependent rule.
pub trait Clock {
  fn today(&self) -> CalendarDate;
}

/// Reads the local wall clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> CalendarDate { CalendarDate::today() }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
  fn today(&self) -> CalendarDate { self.0 }
}
