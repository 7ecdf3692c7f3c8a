//! Seed-file formats for Studio Manager.
//!
//! Parses member and class listings into [`studio_core`] types. A file is
//! applied only if every line in it parses; the first bad line aborts the
//! whole file with its line number.
//!
//! ```no_run
//! use studio_core::registry::MemberRegistry;
//! use studio_seed::{SeedDefaults, load_members};
//!
//! let mut registry = MemberRegistry::new();
//! let text = "B Jerry Brown 6/30/1979 11/19/2026 Bridgewater\n";
//! let added = load_members(&mut registry, text, &SeedDefaults::default()).unwrap();
//! assert_eq!(added, 1);
//! ```

pub mod error;
mod parse;

pub use error::{Error, Result};
use studio_core::{
  membership::Membership,
  registry::MemberRegistry,
  schedule::{FitnessClass, Schedule},
};

/// Values the member format does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedDefaults {
  /// Guest passes given to every Premium member read from a seed file.
  pub premium_guest_passes: u32,
}

impl Default for SeedDefaults {
  fn default() -> Self { Self { premium_guest_passes: 3 } }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a member listing: `tier first last dob expiration studio` per line.
pub fn parse_members(input: &str, defaults: &SeedDefaults) -> Result<Vec<Membership>> {
  parse::members(input, defaults)
}

/// Parse a class listing: `offer instructor time studio` per line.
pub fn parse_schedule(input: &str) -> Result<Vec<FitnessClass>> {
  parse::classes(input)
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Parse `input` and enroll every member not already in `registry`.
///
/// Returns how many were added. Duplicates are skipped with a warning.
pub fn load_members(
  registry: &mut MemberRegistry,
  input: &str,
  defaults: &SeedDefaults,
) -> Result<usize> {
  let parsed = parse_members(input, defaults)?;
  let total = parsed.len();
  let mut added = 0;
  for member in parsed {
    let profile = member.profile().to_string();
    if registry.add(member) {
      added += 1;
    } else {
      tracing::warn!(%profile, "skipping duplicate member");
    }
  }
  tracing::info!(added, skipped = total - added, "loaded member seed");
  Ok(added)
}

/// Parse `input` and append every class to `schedule`. Returns how many were
/// added.
pub fn load_schedule(schedule: &mut Schedule, input: &str) -> Result<usize> {
  let parsed = parse_schedule(input)?;
  let added = parsed.len();
  for class in parsed {
    if schedule.find(class.key()).is_some() {
      tracing::warn!(class = %class.slot(), "class shadowed by an earlier entry");
    }
    schedule.push(class);
  }
  tracing::info!(added, "loaded class seed");
  Ok(added)
}
