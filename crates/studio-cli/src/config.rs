//! Layered settings: built-in defaults, an optional TOML file, then
//! `STUDIO_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use studio_core::{billing::Rates, calendar::CalendarDate};
use studio_seed::SeedDefaults;

/// Shape of the configuration sources. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
  pub rates:                Rates,
  /// Guest passes for Premium members who enroll without a count, and for
  /// every Premium member read from a seed file.
  pub premium_guest_passes: u32,
  /// Cap on a member's registration list; unset means unbounded.
  pub max_registrations:    Option<usize>,
  /// Member seed file to preload.
  pub members:              Option<PathBuf>,
  /// Class seed file to preload.
  pub schedule:             Option<PathBuf>,
  /// Pin "today" instead of reading the system clock.
  pub today:                Option<CalendarDate>,
}

impl Default for StudioConfig {
  fn default() -> Self {
    Self {
      rates:                Rates::default(),
      premium_guest_passes: 3,
      max_registrations:    None,
      members:              None,
      schedule:             None,
      today:                None,
    }
  }
}

/// The subset of configuration the interpreter consults while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub rates:                Rates,
  pub premium_guest_passes: u32,
  pub max_registrations:    Option<usize>,
}

impl Default for Settings {
  fn default() -> Self { StudioConfig::default().settings() }
}

impl Settings {
  pub fn seed_defaults(&self) -> SeedDefaults {
    SeedDefaults { premium_guest_passes: self.premium_guest_passes }
  }
}

impl StudioConfig {
  /// Load from `path` (if given) and the process environment.
  pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
    Self::load_from(path, environment())
  }

  /// Load from `path` (if given) and an explicit environment source.
  pub fn load_from(
    path: Option<&Path>,
    env: config::Environment,
  ) -> Result<Self, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    builder.add_source(env).build()?.try_deserialize()
  }

  pub fn settings(&self) -> Settings {
    Settings {
      rates:                self.rates.clone(),
      premium_guest_passes: self.premium_guest_passes,
      max_registrations:    self.max_registrations,
    }
  }
}

/// `STUDIO_PREMIUM_GUEST_PASSES`, `STUDIO_RATES__BASIC_MONTHLY`, and so on.
fn environment() -> config::Environment {
  config::Environment::with_prefix("STUDIO")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}
