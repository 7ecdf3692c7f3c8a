//! The class schedule, class rosters, and attendance rules.
//!
//! Every attendance operation runs all of its checks before touching any
//! state, so a rejected request leaves the roster, the member's registration
//! list, and the tier counters exactly as they were.

use crate::{
  Error,
  PolicyViolation,
  Result,
  calendar::CalendarDate,
  catalog::{ClassKey, ClassSlot, Instructor, Location, Offer, TimeSlot},
  membership::Membership,
  profile::Profile,
};

// ─── Roster ──────────────────────────────────────────────────────────────────

/// A set of profiles, in the order they joined.
#[derive(Debug, Clone, Default)]
pub struct Roster {
  profiles: Vec<Profile>,
}

impl Roster {
  /// Returns `false` without inserting if `profile` is already present.
  pub fn add(&mut self, profile: Profile) -> bool {
    if self.contains(&profile) {
      return false;
    }
    self.profiles.push(profile);
    true
  }

  pub fn remove(&mut self, profile: &Profile) -> bool {
    match self.profiles.iter().position(|p| p == profile) {
      Some(index) => {
        self.profiles.remove(index);
        true
      }
      None => false,
    }
  }

  pub fn contains(&self, profile: &Profile) -> bool {
    self.profiles.iter().any(|p| p == profile)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Profile> { self.profiles.iter() }

  pub fn len(&self) -> usize { self.profiles.len() }

  pub fn is_empty(&self) -> bool { self.profiles.is_empty() }
}

// ─── FitnessClass ────────────────────────────────────────────────────────────

/// One scheduled class and who is coming to it.
#[derive(Debug, Clone)]
pub struct FitnessClass {
  offer:      Offer,
  instructor: Instructor,
  studio:     Location,
  time:       TimeSlot,
  attendees:  Roster,
  /// Hosts who have brought a guest to this class.
  guests:     Roster,
}

impl FitnessClass {
  pub fn new(
    offer: Offer,
    instructor: Instructor,
    studio: Location,
    time: TimeSlot,
  ) -> Self {
    Self {
      offer,
      instructor,
      studio,
      time,
      attendees: Roster::default(),
      guests: Roster::default(),
    }
  }

  pub fn offer(&self) -> Offer { self.offer }

  pub fn instructor(&self) -> Instructor { self.instructor }

  pub fn studio(&self) -> Location { self.studio }

  pub fn time(&self) -> TimeSlot { self.time }

  pub fn attendees(&self) -> &Roster { &self.attendees }

  pub fn guests(&self) -> &Roster { &self.guests }

  pub fn key(&self) -> ClassKey {
    ClassKey {
      offer:      self.offer,
      instructor: self.instructor,
      studio:     self.studio,
    }
  }

  pub fn slot(&self) -> ClassSlot {
    ClassSlot {
      offer:      self.offer,
      instructor: self.instructor,
      studio:     self.studio,
      time:       self.time,
    }
  }
}

// ─── Schedule ────────────────────────────────────────────────────────────────

/// All scheduled classes, in load order.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
  classes:            Vec<FitnessClass>,
  /// Upper bound on a member's registration list; `None` means unbounded.
  registration_limit: Option<usize>,
}

impl Schedule {
  pub fn new() -> Self { Self::default() }

  pub fn with_registration_limit(limit: Option<usize>) -> Self {
    Self { classes: Vec::new(), registration_limit: limit }
  }

  /// Append a class. Duplicates are kept; lookups find the earliest one.
  pub fn push(&mut self, class: FitnessClass) { self.classes.push(class); }

  pub fn iter(&self) -> impl Iterator<Item = &FitnessClass> { self.classes.iter() }

  pub fn len(&self) -> usize { self.classes.len() }

  pub fn is_empty(&self) -> bool { self.classes.is_empty() }

  /// The first class matching all three criteria.
  pub fn find_by_criteria(
    &self,
    offer: Offer,
    instructor: Instructor,
    studio: Location,
  ) -> Option<&FitnessClass> {
    self.find(ClassKey { offer, instructor, studio })
  }

  pub fn find(&self, key: ClassKey) -> Option<&FitnessClass> {
    self.classes.iter().find(|c| c.key() == key)
  }

  /// The first class `member` is registered for at `time`, if any.
  pub fn has_time_conflict(member: &Membership, time: TimeSlot) -> Option<ClassSlot> {
    member.registered().iter().find(|s| s.time == time).copied()
  }

  // ── Member attendance ───────────────────────────────────────────────────

  /// Record `member` as attending the class identified by `key`.
  ///
  /// Checks, in order: expiry, the home-studio restriction for tiers that
  /// have one, that the class exists, that the member is not already on the
  /// roster, time conflicts, and the registration limit.
  pub fn confirm_attendance(
    &mut self,
    key: ClassKey,
    member: &mut Membership,
    today: CalendarDate,
  ) -> Result<ClassSlot> {
    check_not_expired(member, today)?;
    if member.kind().home_studio_only() && member.home_studio() != key.studio {
      return Err(
        PolicyViolation::HomeStudioMismatch {
          home:      member.home_studio(),
          attempted: key.studio,
        }
        .into(),
      );
    }
    let index = self.position(key)?;
    let slot = self.classes[index].slot();
    if self.classes[index].attendees.contains(member.profile()) {
      return Err(PolicyViolation::AlreadyRegistered(slot).into());
    }
    if let Some(other) = Self::has_time_conflict(member, slot.time) {
      return Err(PolicyViolation::TimeConflict(other).into());
    }
    self.check_registration_limit(member)?;

    self.classes[index].attendees.add(member.profile().clone());
    member.register_class(slot);
    member.record_attendance();
    Ok(slot)
  }

  /// Take `member` off the attendee roster of the class identified by `key`.
  /// Attendance already counted for billing stays counted.
  pub fn remove_member(
    &mut self,
    key: ClassKey,
    member: &mut Membership,
  ) -> Result<ClassSlot> {
    let index = self.position(key)?;
    let slot = self.classes[index].slot();
    if !self.classes[index].attendees.remove(member.profile()) {
      return Err(Error::NotAttending(slot));
    }
    member.unregister_class(&slot);
    Ok(slot)
  }

  // ── Guest attendance ────────────────────────────────────────────────────

  /// Record a guest brought by `member` to the class identified by `key`.
  ///
  /// Guests may only be brought to the host's home studio. A host can have
  /// one guest per class.
  pub fn confirm_guest_attendance(
    &mut self,
    key: ClassKey,
    member: &mut Membership,
    today: CalendarDate,
  ) -> Result<ClassSlot> {
    check_not_expired(member, today)?;
    if !member.kind().offers_guest_passes() {
      return Err(PolicyViolation::NoGuestPrivileges(member.kind()).into());
    }
    let index = self.position(key)?;
    let slot = self.classes[index].slot();
    if !member.has_guest_pass() {
      return Err(PolicyViolation::GuestPassUnavailable.into());
    }
    if member.home_studio() != slot.studio {
      return Err(
        PolicyViolation::HomeStudioMismatch {
          home:      member.home_studio(),
          attempted: slot.studio,
        }
        .into(),
      );
    }
    if self.classes[index].guests.contains(member.profile()) {
      return Err(PolicyViolation::GuestAlreadyRegistered(slot).into());
    }
    self.check_registration_limit(member)?;

    if !member.take_guest_pass() {
      return Err(PolicyViolation::GuestPassUnavailable.into());
    }
    self.classes[index].guests.add(member.profile().clone());
    member.register_class(slot);
    Ok(slot)
  }

  /// Remove the guest `member` brought to the class identified by `key`,
  /// giving the guest pass back.
  pub fn remove_guest(
    &mut self,
    key: ClassKey,
    member: &mut Membership,
  ) -> Result<ClassSlot> {
    let index = self.position(key)?;
    let slot = self.classes[index].slot();
    if !self.classes[index].guests.remove(member.profile()) {
      return Err(Error::NoGuestAttending(slot));
    }
    member.unregister_class(&slot);
    member.restore_guest_pass();
    Ok(slot)
  }

  /// Drop `profile` from every attendee and guest roster. Used when a
  /// membership is cancelled.
  pub fn withdraw(&mut self, profile: &Profile) -> usize {
    let mut removed = 0;
    for class in &mut self.classes {
      removed += usize::from(class.attendees.remove(profile));
      removed += usize::from(class.guests.remove(profile));
    }
    removed
  }

  fn position(&self, key: ClassKey) -> Result<usize> {
    self
      .classes
      .iter()
      .position(|c| c.key() == key)
      .ok_or(Error::ClassNotFound(key))
  }

  fn check_registration_limit(&self, member: &Membership) -> Result<()> {
    match self.registration_limit {
      Some(limit) if member.registered().len() >= limit => {
        Err(PolicyViolation::RegistrationLimit(limit).into())
      }
      _ => Ok(()),
    }
  }
}

fn check_not_expired(member: &Membership, today: CalendarDate) -> Result<()> {
  if member.is_expired(today) {
    return Err(PolicyViolation::Expired(member.expires()).into());
  }
  Ok(())
}

impl Extend<FitnessClass> for Schedule {
  fn extend<I: IntoIterator<Item = FitnessClass>>(&mut self, iter: I) {
    self.classes.extend(iter);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{ErrorKind, membership::Tier};

  const TODAY: CalendarDate = CalendarDate::new(10, 19, 2026);

  fn schedule() -> Schedule {
    let mut s = Schedule::new();
    s.push(FitnessClass::new(
      Offer::Pilates,
      Instructor::Jennifer,
      Location::Bridgewater,
      TimeSlot::Morning,
    ));
    s.push(FitnessClass::new(
      Offer::Spinning,
      Instructor::Denise,
      Location::Edison,
      TimeSlot::Morning,
    ));
    s.push(FitnessClass::new(
      Offer::Cardio,
      Instructor::Kim,
      Location::Bridgewater,
      TimeSlot::Afternoon,
    ));
    s
  }

  fn key(offer: Offer, instructor: Instructor, studio: Location) -> ClassKey {
    ClassKey { offer, instructor, studio }
  }

  fn pilates() -> ClassKey {
    key(Offer::Pilates, Instructor::Jennifer, Location::Bridgewater)
  }

  fn spinning() -> ClassKey {
    key(Offer::Spinning, Instructor::Denise, Location::Edison)
  }

  fn cardio() -> ClassKey { key(Offer::Cardio, Instructor::Kim, Location::Bridgewater) }

  fn member(tier: Tier, home: Location) -> Membership {
    Membership::new(
      Profile::new("Jane", "Doe", CalendarDate::new(5, 1, 1996)),
      CalendarDate::new(1, 19, 2027),
      home,
      tier,
    )
  }

  #[test]
  fn first_loaded_class_wins_lookup() {
    let mut s = schedule();
    s.push(FitnessClass::new(
      Offer::Pilates,
      Instructor::Jennifer,
      Location::Bridgewater,
      TimeSlot::Evening,
    ));
    let found = s
      .find_by_criteria(Offer::Pilates, Instructor::Jennifer, Location::Bridgewater)
      .unwrap();
    assert_eq!(found.time(), TimeSlot::Morning);
    assert!(s
      .find_by_criteria(Offer::Pilates, Instructor::Kim, Location::Bridgewater)
      .is_none());
  }

  #[test]
  fn confirm_updates_roster_registration_and_count() {
    let mut s = schedule();
    let mut m = member(Tier::basic(), Location::Bridgewater);
    let slot = s.confirm_attendance(pilates(), &mut m, TODAY).unwrap();
    assert_eq!(slot.time, TimeSlot::Morning);
    assert!(s.find(pilates()).unwrap().attendees().contains(m.profile()));
    assert_eq!(m.registered(), [slot]);
    assert_eq!(m.classes_attended(), Some(1));
  }

  #[test]
  fn confirming_twice_is_rejected_without_changes() {
    let mut s = schedule();
    let mut m = member(Tier::basic(), Location::Bridgewater);
    s.confirm_attendance(pilates(), &mut m, TODAY).unwrap();
    let err = s.confirm_attendance(pilates(), &mut m, TODAY).unwrap_err();
    assert!(matches!(
      err.policy(),
      Some(PolicyViolation::AlreadyRegistered(_))
    ));
    assert_eq!(s.find(pilates()).unwrap().attendees().len(), 1);
    assert_eq!(m.registered().len(), 1);
    assert_eq!(m.classes_attended(), Some(1));
  }

  #[test]
  fn same_time_different_class_conflicts() {
    let mut s = schedule();
    let mut m = member(Tier::premium(0), Location::Bridgewater);
    let first = s.confirm_attendance(pilates(), &mut m, TODAY).unwrap();
    assert_eq!(Schedule::has_time_conflict(&m, TimeSlot::Morning), Some(first));
    assert_eq!(Schedule::has_time_conflict(&m, TimeSlot::Afternoon), None);

    let err = s.confirm_attendance(spinning(), &mut m, TODAY).unwrap_err();
    assert_eq!(err.policy(), Some(&PolicyViolation::TimeConflict(first)));
    assert!(s.find(spinning()).unwrap().attendees().is_empty());

    s.confirm_attendance(cardio(), &mut m, TODAY).unwrap();
    assert_eq!(m.registered().len(), 2);
  }

  #[test]
  fn basic_is_restricted_to_home_studio() {
    let mut s = schedule();
    let mut m = member(Tier::basic(), Location::Franklin);
    let err = s.confirm_attendance(pilates(), &mut m, TODAY).unwrap_err();
    assert_eq!(
      err.policy(),
      Some(&PolicyViolation::HomeStudioMismatch {
        home:      Location::Franklin,
        attempted: Location::Bridgewater,
      })
    );
  }

  #[test]
  fn family_and_premium_may_attend_anywhere() {
    let mut s = schedule();
    let mut family = member(Tier::family(), Location::Franklin);
    assert!(s.confirm_attendance(spinning(), &mut family, TODAY).is_ok());
    assert_eq!(family.classes_attended(), None);
  }

  #[test]
  fn expired_members_cannot_attend() {
    let mut s = schedule();
    let mut m = member(Tier::basic(), Location::Bridgewater);
    let later = CalendarDate::new(1, 20, 2027);
    let err = s.confirm_attendance(pilates(), &mut m, later).unwrap_err();
    assert!(matches!(err.policy(), Some(PolicyViolation::Expired(_))));
    let err = s.confirm_guest_attendance(pilates(), &mut m, later).unwrap_err();
    assert!(matches!(err.policy(), Some(PolicyViolation::Expired(_))));
  }

  #[test]
  fn unknown_class_is_not_found() {
    let mut s = schedule();
    let mut m = member(Tier::premium(1), Location::Edison);
    let missing = key(Offer::Cardio, Instructor::Emma, Location::Edison);
    let err = s.confirm_attendance(missing, &mut m, TODAY).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, Error::ClassNotFound(k) if k == missing));
  }

  #[test]
  fn remove_member_detaches_everything() {
    let mut s = schedule();
    let mut m = member(Tier::basic(), Location::Bridgewater);
    s.confirm_attendance(pilates(), &mut m, TODAY).unwrap();
    s.remove_member(pilates(), &mut m).unwrap();
    assert!(s.find(pilates()).unwrap().attendees().is_empty());
    assert!(m.registered().is_empty());
    assert_eq!(m.classes_attended(), Some(1));

    let err = s.remove_member(pilates(), &mut m).unwrap_err();
    assert!(matches!(err, Error::NotAttending(_)));
  }

  #[test]
  fn basic_members_cannot_bring_guests() {
    let mut s = schedule();
    let mut m = member(Tier::basic(), Location::Bridgewater);
    let err = s.confirm_guest_attendance(pilates(), &mut m, TODAY).unwrap_err();
    assert_eq!(
      err.policy(),
      Some(&PolicyViolation::NoGuestPrivileges(crate::membership::TierKind::Basic))
    );
  }

  #[test]
  fn guest_uses_a_pass_and_the_guest_roster_only() {
    let mut s = schedule();
    let mut m = member(Tier::family(), Location::Bridgewater);
    s.confirm_guest_attendance(pilates(), &mut m, TODAY).unwrap();
    let class = s.find(pilates()).unwrap();
    assert!(class.guests().contains(m.profile()));
    assert!(class.attendees().is_empty());
    assert!(!m.has_guest_pass());
    assert_eq!(m.registered().len(), 1);
  }

  #[test]
  fn guests_only_at_home_studio() {
    let mut s = schedule();
    let mut m = member(Tier::premium(2), Location::Bridgewater);
    let err = s.confirm_guest_attendance(spinning(), &mut m, TODAY).unwrap_err();
    assert!(matches!(
      err.policy(),
      Some(PolicyViolation::HomeStudioMismatch { .. })
    ));
    assert_eq!(m.guest_passes(), 2);
  }

  #[test]
  fn family_pass_exhausts_until_guest_removed() {
    let mut s = schedule();
    let mut m = member(Tier::family(), Location::Bridgewater);
    s.confirm_guest_attendance(pilates(), &mut m, TODAY).unwrap();

    let err = s.confirm_guest_attendance(cardio(), &mut m, TODAY).unwrap_err();
    assert_eq!(err.policy(), Some(&PolicyViolation::GuestPassUnavailable));
    assert!(s.find(cardio()).unwrap().guests().is_empty());

    s.remove_guest(pilates(), &mut m).unwrap();
    assert!(m.has_guest_pass());
    assert!(m.registered().is_empty());
    s.confirm_guest_attendance(cardio(), &mut m, TODAY).unwrap();
  }

  #[test]
  fn one_guest_per_host_per_class() {
    let mut s = schedule();
    let mut m = member(Tier::premium(3), Location::Bridgewater);
    s.confirm_guest_attendance(pilates(), &mut m, TODAY).unwrap();
    let err = s.confirm_guest_attendance(pilates(), &mut m, TODAY).unwrap_err();
    assert!(matches!(
      err.policy(),
      Some(PolicyViolation::GuestAlreadyRegistered(_))
    ));
    assert_eq!(m.guest_passes(), 2);
  }

  #[test]
  fn removing_an_absent_guest_keeps_passes() {
    let mut s = schedule();
    let mut m = member(Tier::premium(1), Location::Bridgewater);
    let err = s.remove_guest(pilates(), &mut m).unwrap_err();
    assert!(matches!(err, Error::NoGuestAttending(_)));
    assert_eq!(m.guest_passes(), 1);
  }

  #[test]
  fn registration_limit_is_enforced_when_set() {
    let mut s = schedule();
    let mut limited = Schedule::with_registration_limit(Some(1));
    limited.extend(s.iter().cloned());
    let mut m = member(Tier::premium(0), Location::Bridgewater);
    limited.confirm_attendance(pilates(), &mut m, TODAY).unwrap();
    let err = limited.confirm_attendance(cardio(), &mut m, TODAY).unwrap_err();
    assert_eq!(err.policy(), Some(&PolicyViolation::RegistrationLimit(1)));

    let mut unlimited = member(Tier::premium(0), Location::Bridgewater);
    s.confirm_attendance(pilates(), &mut unlimited, TODAY).unwrap();
    s.confirm_attendance(cardio(), &mut unlimited, TODAY).unwrap();
  }

  #[test]
  fn withdraw_clears_every_roster() {
    let mut s = schedule();
    let mut m = member(Tier::premium(1), Location::Bridgewater);
    s.confirm_attendance(pilates(), &mut m, TODAY).unwrap();
    s.confirm_guest_attendance(cardio(), &mut m, TODAY).unwrap();
    assert_eq!(s.withdraw(m.profile()), 2);
    assert!(s.iter().all(|c| c.attendees().is_empty() && c.guests().is_empty()));
  }
}
