//! The studio's fixed catalog: locations, instructors, offered classes, and
//! time slots.
//!
//! Every catalog type is looked up case-insensitively by its name, so
//! `"bridgewater"`, `"Bridgewater"` and `"BRIDGEWATER"` all resolve to
//! [`Location::Bridgewater`].

use std::{fmt, str::FromStr};

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

fn lookup<T: FromStr>(name: &str, unknown: fn(String) -> Error) -> Result<T> {
  name.trim().parse().map_err(|_| unknown(name.to_string()))
}

// ─── Location ────────────────────────────────────────────────────────────────

/// A studio. Members have one as their home studio; every class is held at
/// one.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Location {
  Bridgewater,
  Edison,
  Franklin,
  Piscataway,
  Somerville,
}

impl Location {
  pub fn lookup(name: &str) -> Result<Self> {
    lookup(name, Error::UnknownLocation)
  }

  /// The catalog name, e.g. `"BRIDGEWATER"`.
  pub fn name(self) -> &'static str { self.into() }

  pub fn city(self) -> &'static str {
    match self {
      Self::Bridgewater => "Bridgewater",
      Self::Edison => "Edison",
      Self::Franklin => "Franklin",
      Self::Piscataway => "Piscataway",
      Self::Somerville => "Somerville",
    }
  }

  pub fn zip_code(self) -> &'static str {
    match self {
      Self::Bridgewater => "08807",
      Self::Edison => "08837",
      Self::Franklin => "08873",
      Self::Piscataway => "08854",
      Self::Somerville => "08876",
    }
  }

  pub fn county(self) -> &'static str {
    match self {
      Self::Bridgewater | Self::Franklin | Self::Somerville => "Somerset",
      Self::Edison | Self::Piscataway => "Middlesex",
    }
  }
}

/// `CITY, ZIP, COUNTY`, upper-cased.
impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}, {}, {}",
      self.city().to_uppercase(),
      self.zip_code(),
      self.county().to_uppercase()
    )
  }
}

// ─── Instructor ──────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Instructor {
  Jennifer,
  Kim,
  Denise,
  Davis,
  Emma,
}

impl Instructor {
  pub fn lookup(name: &str) -> Result<Self> {
    lookup(name, Error::UnknownInstructor)
  }

  pub fn name(self) -> &'static str { self.into() }
}

impl fmt::Display for Instructor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Offer ───────────────────────────────────────────────────────────────────

/// A kind of class the studio offers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum Offer {
  Pilates,
  Spinning,
  Cardio,
}

impl Offer {
  pub fn lookup(name: &str) -> Result<Self> { lookup(name, Error::UnknownOffer) }

  pub fn name(self) -> &'static str { self.into() }
}

impl fmt::Display for Offer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─── TimeSlot ────────────────────────────────────────────────────────────────

/// The hour of the day a class starts.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum TimeSlot {
  Morning,
  Afternoon,
  Evening,
}

impl TimeSlot {
  pub fn lookup(name: &str) -> Result<Self> {
    lookup(name, Error::UnknownTimeSlot)
  }

  pub fn hour(self) -> u32 {
    match self {
      Self::Morning => 9,
      Self::Afternoon => 14,
      Self::Evening => 18,
    }
  }

  pub fn minute(self) -> u32 {
    match self {
      Self::Morning | Self::Evening => 30,
      Self::Afternoon => 0,
    }
  }
}

/// `H:MM`, no leading zero on the hour.
impl fmt::Display for TimeSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{:02}", self.hour(), self.minute())
  }
}

// ─── Class identity ──────────────────────────────────────────────────────────

/// The lookup key for a class in the schedule. Time is deliberately not part
/// of it: the first class loaded for a key shadows any later duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassKey {
  pub offer:      Offer,
  pub instructor: Instructor,
  pub studio:     Location,
}

impl ClassKey {
  /// Resolve all three names, reporting the instructor first, then the
  /// class name, then the studio.
  pub fn lookup(offer: &str, instructor: &str, studio: &str) -> Result<Self> {
    let instructor = Instructor::lookup(instructor)?;
    let offer = Offer::lookup(offer)?;
    let studio = Location::lookup(studio)?;
    Ok(Self { offer, instructor, studio })
  }
}

impl fmt::Display for ClassKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} by {} at {}",
      self.offer,
      self.instructor,
      self.studio.city().to_uppercase()
    )
  }
}

/// A fully scheduled occurrence: the key plus its time. Memberships keep a
/// list of these as back-references to the classes they are registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassSlot {
  pub offer:      Offer,
  pub instructor: Instructor,
  pub studio:     Location,
  pub time:       TimeSlot,
}

impl ClassSlot {
  pub fn key(&self) -> ClassKey {
    ClassKey {
      offer:      self.offer,
      instructor: self.instructor,
      studio:     self.studio,
    }
  }
}

/// `OFFER - INSTRUCTOR, H:MM, CITY`
impl fmt::Display for ClassSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} - {}, {}, {}",
      self.offer,
      self.instructor,
      self.time,
      self.studio.city().to_uppercase()
    )
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn lookups_ignore_case() {
    assert_eq!(Location::lookup("bridgewater").unwrap(), Location::Bridgewater);
    assert_eq!(Location::lookup("EdIsOn").unwrap(), Location::Edison);
    assert_eq!(Instructor::lookup("jennifer").unwrap(), Instructor::Jennifer);
    assert_eq!(Offer::lookup("Cardio").unwrap(), Offer::Cardio);
    assert_eq!(TimeSlot::lookup("evening").unwrap(), TimeSlot::Evening);
  }

  #[test]
  fn unknown_names_keep_the_input() {
    let err = Location::lookup("Newark").unwrap_err();
    assert!(matches!(err, Error::UnknownLocation(ref n) if n == "Newark"));
    assert!(matches!(
      Instructor::lookup("Bob"),
      Err(Error::UnknownInstructor(_))
    ));
    assert!(matches!(Offer::lookup("yoga"), Err(Error::UnknownOffer(_))));
    assert!(matches!(
      TimeSlot::lookup("night"),
      Err(Error::UnknownTimeSlot(_))
    ));
  }

  #[test]
  fn class_key_reports_instructor_before_offer() {
    let err = ClassKey::lookup("yoga", "Bob", "Newark").unwrap_err();
    assert!(matches!(err, Error::UnknownInstructor(_)));
    let err = ClassKey::lookup("yoga", "kim", "Newark").unwrap_err();
    assert!(matches!(err, Error::UnknownOffer(_)));
    let err = ClassKey::lookup("cardio", "kim", "Newark").unwrap_err();
    assert!(matches!(err, Error::UnknownLocation(_)));
  }

  #[test]
  fn location_renders_upper_case() {
    assert_eq!(Location::Bridgewater.to_string(), "BRIDGEWATER, 08807, SOMERSET");
    assert_eq!(Location::Piscataway.to_string(), "PISCATAWAY, 08854, MIDDLESEX");
  }

  #[test]
  fn every_location_has_a_five_digit_zip() {
    for location in Location::iter() {
      assert_eq!(location.zip_code().len(), 5, "{location:?}");
      assert_eq!(location.name(), location.city().to_uppercase());
    }
  }

  #[test]
  fn time_slots_drop_the_leading_zero() {
    assert_eq!(TimeSlot::Morning.to_string(), "9:30");
    assert_eq!(TimeSlot::Afternoon.to_string(), "14:00");
    assert_eq!(TimeSlot::Evening.to_string(), "18:30");
  }

  #[test]
  fn slot_renders_as_a_schedule_line() {
    let slot = ClassSlot {
      offer:      Offer::Pilates,
      instructor: Instructor::Jennifer,
      studio:     Location::Bridgewater,
      time:       TimeSlot::Morning,
    };
    assert_eq!(slot.to_string(), "PILATES - JENNIFER, 9:30, BRIDGEWATER");
    assert_eq!(slot.key().studio, Location::Bridgewater);
  }
}
