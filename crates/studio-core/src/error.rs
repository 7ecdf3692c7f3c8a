//! Error types for `studio-core`.

use thiserror::Error;

use crate::{
  calendar::CalendarDate,
  catalog::{ClassKey, ClassSlot, Location},
  membership::TierKind,
  profile::Profile,
};

#[derive(Debug, Error)]
pub enum Error {
  // ── Format ──────────────────────────────────────────────────────────────
  #[error("malformed date: {0:?}")]
  MalformedDate(String),

  #[error("invalid calendar date: {0}")]
  InvalidDate(CalendarDate),

  #[error("date is today or in the future: {0}")]
  FutureDate(CalendarDate),

  #[error("invalid amount: {0}")]
  InvalidAmount(String),

  // ── Lookup ──────────────────────────────────────────────────────────────
  #[error("unknown studio location: {0:?}")]
  UnknownLocation(String),

  #[error("unknown instructor: {0:?}")]
  UnknownInstructor(String),

  #[error("unknown class name: {0:?}")]
  UnknownOffer(String),

  #[error("unknown time slot: {0:?}")]
  UnknownTimeSlot(String),

  #[error("unknown membership tier: {0:?}")]
  UnknownTier(String),

  // ── Duplicate / not found ───────────────────────────────────────────────
  #[error("{0} is already enrolled")]
  DuplicateMember(Profile),

  #[error("{0} is not enrolled")]
  MemberNotFound(Profile),

  #[error("no class {0}")]
  ClassNotFound(ClassKey),

  #[error("not an attendee of {0}")]
  NotAttending(ClassSlot),

  #[error("no guest registered for {0}")]
  NoGuestAttending(ClassSlot),

  // ── Policy ──────────────────────────────────────────────────────────────
  #[error(transparent)]
  Policy(#[from] PolicyViolation),
}

/// A business rule that refused an otherwise well-formed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
  #[error("membership expired {0}")]
  Expired(CalendarDate),

  #[error("home studio is {home:?}, class is at {attempted:?}")]
  HomeStudioMismatch { home: Location, attempted: Location },

  #[error("already in another class held at {}", .0.time)]
  TimeConflict(ClassSlot),

  #[error("guest pass not available")]
  GuestPassUnavailable,

  #[error("{0} memberships have no guest passes")]
  NoGuestPrivileges(TierKind),

  #[error("already registered for {0}")]
  AlreadyRegistered(ClassSlot),

  #[error("guest already registered for {0}")]
  GuestAlreadyRegistered(ClassSlot),

  #[error("must be {0} or older to join")]
  Underage(u32),

  #[error("already registered for the maximum of {0} classes")]
  RegistrationLimit(usize),
}

/// The broad category an [`Error`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A malformed date or number token.
  Format,
  /// An unknown catalog name (location, instructor, class, time, tier).
  Lookup,
  /// The profile is already enrolled.
  Duplicate,
  /// A profile, class, or roster entry that does not exist.
  NotFound,
  /// A business rule refused the request.
  Policy,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::MalformedDate(_)
      | Self::InvalidDate(_)
      | Self::FutureDate(_)
      | Self::InvalidAmount(_) => ErrorKind::Format,
      Self::UnknownLocation(_)
      | Self::UnknownInstructor(_)
      | Self::UnknownOffer(_)
      | Self::UnknownTimeSlot(_)
      | Self::UnknownTier(_) => ErrorKind::Lookup,
      Self::DuplicateMember(_) => ErrorKind::Duplicate,
      Self::MemberNotFound(_)
      | Self::ClassNotFound(_)
      | Self::NotAttending(_)
      | Self::NoGuestAttending(_) => ErrorKind::NotFound,
      Self::Policy(_) => ErrorKind::Policy,
    }
  }

  /// The policy rule that was violated, if this is a policy error.
  pub fn policy(&self) -> Option<&PolicyViolation> {
    match self {
      Self::Policy(violation) => Some(violation),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
