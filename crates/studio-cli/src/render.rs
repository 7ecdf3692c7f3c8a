//! Text rendering for listings and the schedule.

use std::fmt::Write as _;

use strum::IntoEnumIterator;
use studio_core::{
  billing::Rates,
  calendar::CalendarDate,
  catalog::Location,
  membership::{Membership, Tier},
  profile::Profile,
  registry::MemberRegistry,
  schedule::{FitnessClass, Roster, Schedule},
};

pub const EMPTY: &str = "Collection is empty!";
const END_OF_LIST: &str = "-end of list-";

/// One member, as printed by every listing:
///
/// `First:Last:dob, Membership expires d, Home Studio: CITY, ZIP, COUNTY, (Basic) number of classes attended: n`
pub fn membership(member: &Membership, today: CalendarDate) -> String {
  let expired = member.is_expired(today);
  let status = if expired { "expired" } else { "expires" };
  let tier = match member.tier() {
    Tier::Basic { classes_attended } => {
      format!("(Basic) number of classes attended: {classes_attended}")
    }
    Tier::Family { .. } | Tier::Premium { .. } => {
      let label = member.kind().label();
      if expired {
        format!("({label}) guest-pass remaining: not eligible")
      } else {
        format!("({label}) guest-pass remaining: {}", member.guest_passes())
      }
    }
  };
  format!(
    "{}, Membership {status} {}, Home Studio: {}, {tier}",
    member.profile(),
    member.expires(),
    member.home_studio(),
  )
}

fn listing<'a>(
  title: &str,
  members: impl IntoIterator<Item = &'a Membership>,
  line: impl Fn(&Membership) -> String,
) -> String {
  let mut out = format!("-list of members {title}-\n");
  for member in members {
    out.push_str(&line(member));
    out.push('\n');
  }
  out.push_str(END_OF_LIST);
  out
}

pub fn by_profile(registry: &MemberRegistry, today: CalendarDate) -> String {
  if registry.is_empty() {
    return EMPTY.to_owned();
  }
  listing("sorted by member profiles", registry.sorted_by_profile(), |m| {
    membership(m, today)
  })
}

pub fn by_location(registry: &MemberRegistry, today: CalendarDate) -> String {
  if registry.is_empty() {
    return EMPTY.to_owned();
  }
  listing("sorted by county then zipcode", registry.sorted_by_location(), |m| {
    membership(m, today)
  })
}

/// Members in enrollment order with the amount due next.
pub fn dues(registry: &MemberRegistry, rates: &Rates, today: CalendarDate) -> String {
  if registry.is_empty() {
    return EMPTY.to_owned();
  }
  listing("with next dues", registry, |m| {
    format!("{} [next due: ${}]", membership(m, today), m.bill(rates))
  })
}

/// Every class in load order, each followed by its rosters when not empty.
pub fn schedule(
  schedule: &Schedule,
  registry: &MemberRegistry,
  today: CalendarDate,
) -> String {
  let mut out = String::from("-Fitness classes-\n");
  if schedule.is_empty() {
    out.push_str("There are no scheduled classes.\n");
  }
  for class in schedule.iter() {
    out.push_str(&class_with_rosters(class, registry, today));
  }
  out.push_str("-end of class list.");
  out
}

fn class_with_rosters(
  class: &FitnessClass,
  registry: &MemberRegistry,
  today: CalendarDate,
) -> String {
  let mut out = format!("{}\n", class.slot());
  roster(&mut out, "[Attendees]", class.attendees(), registry, today);
  roster(&mut out, "[Guests]", class.guests(), registry, today);
  out
}

fn roster(
  out: &mut String,
  heading: &str,
  roster: &Roster,
  registry: &MemberRegistry,
  today: CalendarDate,
) {
  if roster.is_empty() {
    return;
  }
  out.push_str(heading);
  out.push('\n');
  for profile in roster.iter() {
    let _ = writeln!(out, "   {}", roster_entry(profile, registry, today));
  }
}

/// Rosters hold profiles; show the full membership when it is still enrolled.
fn roster_entry(profile: &Profile, registry: &MemberRegistry, today: CalendarDate) -> String {
  match registry.find(profile) {
    Some(member) => membership(member, today),
    None => profile.to_string(),
  }
}

pub fn locations() -> String {
  let mut out = String::from("-list of studio locations-\n");
  for location in Location::iter() {
    let _ = writeln!(out, "{location}");
  }
  out.push_str(END_OF_LIST);
  out
}
