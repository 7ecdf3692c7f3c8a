//! The member registry: every enrolled membership, at most one per profile.

use crate::{
  membership::Membership,
  profile::{Profile, caseless_cmp},
};

/// A set of memberships keyed by [`Profile`] identity.
///
/// Iteration yields memberships in enrollment order; the sorted views leave
/// that order untouched.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
  members: Vec<Membership>,
}

impl MemberRegistry {
  pub fn new() -> Self { Self::default() }

  /// Insert `member` unless its profile is already enrolled. Returns whether
  /// it was inserted.
  pub fn add(&mut self, member: Membership) -> bool {
    if self.contains(member.profile()) {
      return false;
    }
    self.members.push(member);
    true
  }

  /// Remove the membership for `profile`. Returns whether one was removed.
  pub fn remove(&mut self, profile: &Profile) -> bool {
    match self.position(profile) {
      Some(index) => {
        self.members.remove(index);
        true
      }
      None => false,
    }
  }

  pub fn find(&self, profile: &Profile) -> Option<&Membership> {
    self.members.iter().find(|m| m.profile() == profile)
  }

  pub fn find_mut(&mut self, profile: &Profile) -> Option<&mut Membership> {
    self.members.iter_mut().find(|m| m.profile() == profile)
  }

  pub fn contains(&self, profile: &Profile) -> bool {
    self.position(profile).is_some()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Membership> { self.members.iter() }

  pub fn len(&self) -> usize { self.members.len() }

  pub fn is_empty(&self) -> bool { self.members.is_empty() }

  /// Memberships ordered by profile: last name, first name, date of birth.
  pub fn sorted_by_profile(&self) -> Vec<&Membership> {
    let mut sorted: Vec<&Membership> = self.members.iter().collect();
    sorted.sort_by(|a, b| a.profile().cmp(b.profile()));
    sorted
  }

  /// Memberships ordered by home-studio county (ignoring case), then zip
  /// code. Members of the same studio keep enrollment order.
  pub fn sorted_by_location(&self) -> Vec<&Membership> {
    let mut sorted: Vec<&Membership> = self.members.iter().collect();
    sorted.sort_by(|a, b| {
      let (a, b) = (a.home_studio(), b.home_studio());
      caseless_cmp(a.county(), b.county())
        .then_with(|| a.zip_code().cmp(b.zip_code()))
    });
    sorted
  }

  fn position(&self, profile: &Profile) -> Option<usize> {
    self.members.iter().position(|m| m.profile() == profile)
  }
}

impl<'a> IntoIterator for &'a MemberRegistry {
  type IntoIter = std::slice::Iter<'a, Membership>;
  type Item = &'a Membership;

  fn into_iter(self) -> Self::IntoIter { self.members.iter() }
}
