//! Memberships and their tier-specific billing and guest-pass policy.
//!
//! The three tiers form a closed set. Every decision that depends on the tier
//! is an exhaustive `match` over [`Tier`] or [`TierKind`], so adding a tier
//! fails to compile until each policy has been decided for it.

use std::{cmp::Ordering, fmt};

use strum::IntoStaticStr;

use crate::{
  Error,
  PolicyViolation,
  Result,
  billing::{Money, Rates},
  calendar::CalendarDate,
  catalog::{ClassSlot, Location},
  profile::Profile,
};

/// Minimum age, in years, to enroll.
pub const MIN_AGE: u32 = 18;

// ─── Tiers ───────────────────────────────────────────────────────────────────

/// The tier of a membership, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TierKind {
  Basic,
  Family,
  Premium,
}

impl TierKind {
  /// Months from enrollment until the membership expires.
  pub fn term_months(self) -> u32 {
    match self {
      Self::Basic => 1,
      Self::Family => 3,
      Self::Premium => 12,
    }
  }

  /// Whether members of this tier may only attend classes at their home
  /// studio.
  pub fn home_studio_only(self) -> bool {
    match self {
      Self::Basic => true,
      Self::Family | Self::Premium => false,
    }
  }

  /// Whether this tier can ever bring guests.
  pub fn offers_guest_passes(self) -> bool {
    match self {
      Self::Basic => false,
      Self::Family | Self::Premium => true,
    }
  }

  /// Title-case label, e.g. `"Basic"`.
  pub fn label(self) -> &'static str {
    match self {
      Self::Basic => "Basic",
      Self::Family => "Family",
      Self::Premium => "Premium",
    }
  }
}

/// `BASIC`, `FAMILY`, or `PREMIUM`.
impl fmt::Display for TierKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str((*self).into())
  }
}

/// A tier together with its mutable per-tier state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
  /// Billed monthly; attendance is counted for overage.
  Basic { classes_attended: u32 },
  /// Billed quarterly; one reusable guest pass.
  Family { guest_pass_available: bool },
  /// Billed yearly; a pool of guest passes.
  Premium { guest_passes: u32 },
}

impl Tier {
  pub fn basic() -> Self { Self::Basic { classes_attended: 0 } }

  pub fn family() -> Self { Self::Family { guest_pass_available: true } }

  pub fn premium(guest_passes: u32) -> Self { Self::Premium { guest_passes } }

  pub fn kind(&self) -> TierKind {
    match self {
      Self::Basic { .. } => TierKind::Basic,
      Self::Family { .. } => TierKind::Family,
      Self::Premium { .. } => TierKind::Premium,
    }
  }
}

// ─── Membership ──────────────────────────────────────────────────────────────

/// One enrolled member.
///
/// Equality and ordering follow the [`Profile`] only; the tier never takes
/// part.
#[derive(Debug, Clone)]
pub struct Membership {
  profile:     Profile,
  expires:     CalendarDate,
  home_studio: Location,
  tier:        Tier,
  /// Classes this member is registered for, in registration order.
  registered:  Vec<ClassSlot>,
}

impl Membership {
  /// Build a membership with an explicit expiration date, as read from a
  /// seed file.
  pub fn new(
    profile: Profile,
    expires: CalendarDate,
    home_studio: Location,
    tier: Tier,
  ) -> Self {
    Self { profile, expires, home_studio, tier, registered: Vec::new() }
  }

  /// Enroll a new member today; the expiration date follows the tier's term.
  pub fn enroll(
    profile: Profile,
    home_studio: Location,
    tier: Tier,
    today: CalendarDate,
  ) -> Self {
    let expires = today.add_months(tier.kind().term_months());
    Self::new(profile, expires, home_studio, tier)
  }

  pub fn profile(&self) -> &Profile { &self.profile }

  pub fn expires(&self) -> CalendarDate { self.expires }

  pub fn home_studio(&self) -> Location { self.home_studio }

  pub fn tier(&self) -> &Tier { &self.tier }

  pub fn kind(&self) -> TierKind { self.tier.kind() }

  pub fn registered(&self) -> &[ClassSlot] { &self.registered }

  /// Whether the expiration date is strictly before `today`.
  pub fn is_expired(&self, today: CalendarDate) -> bool { self.expires < today }

  /// The amount due for the next billing period.
  pub fn bill(&self, rates: &Rates) -> Money {
    match self.tier {
      Tier::Basic { classes_attended } => {
        let extra = classes_attended.saturating_sub(rates.included_classes);
        rates.basic_monthly + rates.extra_class.times(extra)
      }
      Tier::Family { .. } => rates.family_monthly.times(3),
      Tier::Premium { .. } => rates.premium_monthly.times(11),
    }
  }

  /// Whether a guest can be brought right now.
  pub fn has_guest_pass(&self) -> bool { self.guest_passes() > 0 }

  /// Guest passes currently available.
  pub fn guest_passes(&self) -> u32 {
    match self.tier {
      Tier::Basic { .. } => 0,
      Tier::Family { guest_pass_available } => u32::from(guest_pass_available),
      Tier::Premium { guest_passes } => guest_passes,
    }
  }

  /// Classes attended this period; only Basic memberships keep count.
  pub fn classes_attended(&self) -> Option<u32> {
    match self.tier {
      Tier::Basic { classes_attended } => Some(classes_attended),
      Tier::Family { .. } | Tier::Premium { .. } => None,
    }
  }

  pub fn register_class(&mut self, slot: ClassSlot) { self.registered.push(slot); }

  /// Remove the first registration equal to `slot`. Returns `false` if there
  /// was none.
  pub fn unregister_class(&mut self, slot: &ClassSlot) -> bool {
    match self.registered.iter().position(|s| s == slot) {
      Some(index) => {
        self.registered.remove(index);
        true
      }
      None => false,
    }
  }

  // ── Tier counters (driven by the schedule) ──────────────────────────────

  pub(crate) fn record_attendance(&mut self) {
    match &mut self.tier {
      Tier::Basic { classes_attended } => *classes_attended += 1,
      Tier::Family { .. } | Tier::Premium { .. } => {}
    }
  }

  /// Use one guest pass. Returns `false` if none was available.
  pub(crate) fn take_guest_pass(&mut self) -> bool {
    match &mut self.tier {
      Tier::Basic { .. } => false,
      Tier::Family { guest_pass_available } => {
        std::mem::replace(guest_pass_available, false)
      }
      Tier::Premium { guest_passes } => match guest_passes.checked_sub(1) {
        Some(left) => {
          *guest_passes = left;
          true
        }
        None => false,
      },
    }
  }

  pub(crate) fn restore_guest_pass(&mut self) {
    match &mut self.tier {
      Tier::Basic { .. } => {}
      Tier::Family { guest_pass_available } => *guest_pass_available = true,
      Tier::Premium { guest_passes } => *guest_passes += 1,
    }
  }
}

impl PartialEq for Membership {
  fn eq(&self, other: &Self) -> bool { self.profile == other.profile }
}

impl Eq for Membership {}

impl Ord for Membership {
  fn cmp(&self, other: &Self) -> Ordering { self.profile.cmp(&other.profile) }
}

impl PartialOrd for Membership {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

// ─── Admission ───────────────────────────────────────────────────────────────

/// Check a date of birth for enrollment: not in the future, a real calendar
/// date, and at least [`MIN_AGE`] years ago (month-granular).
pub fn check_birth_date(dob: CalendarDate, today: CalendarDate) -> Result<()> {
  if dob.is_future(today) {
    return Err(Error::FutureDate(dob));
  }
  if !dob.is_valid(today) {
    return Err(Error::InvalidDate(dob));
  }
  if !dob.is_eligible_by_age(today, MIN_AGE) {
    return Err(PolicyViolation::Underage(MIN_AGE).into());
  }
  Ok(())
}
