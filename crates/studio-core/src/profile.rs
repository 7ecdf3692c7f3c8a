//! Profile: the identity of a member.

use std::{cmp::Ordering, fmt};

use crate::calendar::CalendarDate;

/// First name, last name, and date of birth.
///
/// Two profiles are equal when both names match ignoring case and the birth
/// dates are identical. Profiles order by last name, then first name (both
/// ignoring case), then date of birth.
#[derive(Debug, Clone)]
pub struct Profile {
  first_name:    String,
  last_name:     String,
  date_of_birth: CalendarDate,
}

impl Profile {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    date_of_birth: CalendarDate,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      date_of_birth,
    }
  }

  pub fn first_name(&self) -> &str { &self.first_name }

  pub fn last_name(&self) -> &str { &self.last_name }

  pub fn date_of_birth(&self) -> CalendarDate { self.date_of_birth }

  /// `First Last`, as used in confirmation messages.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Case-insensitive string comparison without allocating.
pub(crate) fn caseless_cmp(a: &str, b: &str) -> Ordering {
  a.chars()
    .flat_map(char::to_lowercase)
    .cmp(b.chars().flat_map(char::to_lowercase))
}

impl PartialEq for Profile {
  fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Profile {}

impl Ord for Profile {
  fn cmp(&self, other: &Self) -> Ordering {
    caseless_cmp(&self.last_name, &other.last_name)
      .then_with(|| caseless_cmp(&self.first_name, &other.first_name))
      .then_with(|| self.date_of_birth.cmp(&other.date_of_birth))
  }
}

impl PartialOrd for Profile {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// `First:Last:M/D/YYYY`
impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.first_name, self.last_name, self.date_of_birth)
  }
}
