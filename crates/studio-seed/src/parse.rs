//! Line parsers for the member and class seed formats.
//!
//! Both formats are whitespace-separated tokens, one record per line. Blank
//! lines are skipped; line numbers count every line, blank or not.

use studio_core::{
  Error as CoreError,
  calendar::CalendarDate,
  catalog::{Instructor, Location, Offer, TimeSlot},
  membership::{Membership, Tier},
  profile::Profile,
  schedule::FitnessClass,
};

use crate::{
  SeedDefaults,
  error::{Error, Result},
};

const MEMBER_FIELDS: usize = 6;
const CLASS_FIELDS: usize = 4;

/// Non-blank lines with their 1-based line numbers, split into tokens.
fn records(input: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
  input
    .lines()
    .enumerate()
    .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
    .filter(|(_, tokens)| !tokens.is_empty())
}

fn field_count(line: usize, tokens: &[&str], expected: usize) -> Error {
  Error::FieldCount { line, expected, found: tokens.len() }
}

/// Attach `line` to a core error.
fn at<T>(line: usize, result: studio_core::Result<T>) -> Result<T> {
  result.map_err(|source| Error::Field { line, source })
}

/// `B`, `F`, or `P`, ignoring case.
fn tier(code: &str, defaults: &SeedDefaults) -> studio_core::Result<Tier> {
  match code.to_ascii_uppercase().as_str() {
    "B" => Ok(Tier::basic()),
    "F" => Ok(Tier::family()),
    "P" => Ok(Tier::premium(defaults.premium_guest_passes)),
    _ => Err(CoreError::UnknownTier(code.to_owned())),
  }
}

/// `tier first last dob expiration studio`
pub(crate) fn member_line(
  line: usize,
  tokens: &[&str],
  defaults: &SeedDefaults,
) -> Result<Membership> {
  let &[code, first, last, dob, expires, studio] = tokens else {
    return Err(field_count(line, tokens, MEMBER_FIELDS));
  };
  let tier = at(line, tier(code, defaults))?;
  let dob: CalendarDate = at(line, dob.parse())?;
  let expires: CalendarDate = at(line, expires.parse())?;
  let studio = at(line, Location::lookup(studio))?;
  Ok(Membership::new(Profile::new(first, last, dob), expires, studio, tier))
}

/// `offer instructor time studio`
pub(crate) fn class_line(line: usize, tokens: &[&str]) -> Result<FitnessClass> {
  let &[offer, instructor, time, studio] = tokens else {
    return Err(field_count(line, tokens, CLASS_FIELDS));
  };
  Ok(FitnessClass::new(
    at(line, Offer::lookup(offer))?,
    at(line, Instructor::lookup(instructor))?,
    at(line, Location::lookup(studio))?,
    at(line, TimeSlot::lookup(time))?,
  ))
}

pub(crate) fn members(input: &str, defaults: &SeedDefaults) -> Result<Vec<Membership>> {
  records(input)
    .map(|(line, tokens)| member_line(line, &tokens, defaults))
    .collect()
}

pub(crate) fn classes(input: &str) -> Result<Vec<FitnessClass>> {
  records(input)
    .map(|(line, tokens)| class_line(line, &tokens))
    .collect()
}

#[cfg(test)]
mod tests {
  use studio_core::{ErrorKind, membership::TierKind};

  use super::*;

  fn defaults() -> SeedDefaults { SeedDefaults { premium_guest_passes: 3 } }

  #[test]
  fn parses_each_tier_code() {
    let input = "B Jerry Brown 6/30/1979 11/19/2026 Bridgewater\n\
                 f Jane Doe 5/1/1996 1/19/2027 EDISON\n\
                 P Mary Lindsey 12/1/1989 10/19/2027 franklin\n";
    let members = members(input, &defaults()).unwrap();
    let kinds: Vec<TierKind> = members.iter().map(Membership::kind).collect();
    assert_eq!(kinds, [TierKind::Basic, TierKind::Family, TierKind::Premium]);

    let jerry = &members[0];
    assert_eq!(jerry.profile().to_string(), "Jerry:Brown:6/30/1979");
    assert_eq!(jerry.expires(), CalendarDate::new(11, 19, 2026));
    assert_eq!(jerry.home_studio(), Location::Bridgewater);
    assert_eq!(jerry.classes_attended(), Some(0));

    assert!(members[1].has_guest_pass());
    assert_eq!(members[2].guest_passes(), 3);
  }

  #[test]
  fn skips_blank_lines_but_counts_them() {
    let input = "\n   \nB Jerry Brown 6/30/1979 11/19/2026 Bridgewater\n\nX A B 1/1/1990 1/1/2027 Edison\n";
    let err = members(input, &defaults()).unwrap_err();
    assert_eq!(err.line(), 5);
    let Error::Field { source, .. } = err else {
      panic!("expected a field error")
    };
    assert!(matches!(source, CoreError::UnknownTier(code) if code == "X"));
  }

  #[test]
  fn wrong_field_count_is_reported() {
    let err = members("B Jerry Brown 6/30/1979 Bridgewater", &defaults()).unwrap_err();
    assert!(matches!(
      err,
      Error::FieldCount { line: 1, expected: 6, found: 5 }
    ));
  }

  #[test]
  fn bad_date_and_studio_are_field_errors() {
    let err =
      members("B Jerry Brown 6-30-1979 11/19/2026 Bridgewater", &defaults()).unwrap_err();
    let Error::Field { source, .. } = err else { panic!("expected a field error") };
    assert_eq!(source.kind(), ErrorKind::Format);

    let err =
      members("B Jerry Brown 6/30/1979 11/19/2026 Newark", &defaults()).unwrap_err();
    let Error::Field { source, .. } = err else { panic!("expected a field error") };
    assert!(matches!(source, CoreError::UnknownLocation(_)));
  }

  #[test]
  fn parses_classes() {
    let input = "Pilates Jennifer morning Bridgewater\nCARDIO kim EVENING somerville\n";
    let classes = classes(input).unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].slot().to_string(), "PILATES - JENNIFER, 9:30, BRIDGEWATER");
    assert_eq!(classes[1].time(), TimeSlot::Evening);
    assert_eq!(classes[1].studio(), Location::Somerville);
    assert!(classes[1].attendees().is_empty());
  }

  #[test]
  fn class_errors_carry_line_numbers() {
    let err = classes("Pilates Jennifer morning Bridgewater\nYoga Kim evening Edison")
      .unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(err.to_string().starts_with("line 2:"));

    let err = classes("Pilates Jennifer noon Bridgewater").unwrap_err();
    let Error::Field { source, .. } = err else { panic!("expected a field error") };
    assert!(matches!(source, CoreError::UnknownTimeSlot(_)));
  }
}
