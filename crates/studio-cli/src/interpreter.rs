//! The line-oriented command interpreter.
//!
//! Each line is a command code followed by whitespace-separated tokens. A
//! handler validates its tokens, performs at most one registry or schedule
//! transition, and returns one message. Rejections are messages too; nothing
//! a command does can end the loop except `Q` or end of input.

use std::{
  borrow::Cow,
  io::{self, BufRead, Write},
  path::Path,
};

use studio_core::{
  Error,
  PolicyViolation,
  calendar::{CalendarDate, Clock},
  catalog::{ClassKey, ClassSlot, Location},
  membership::{Membership, Tier, TierKind, check_birth_date},
  profile::Profile,
  registry::MemberRegistry,
  schedule::Schedule,
};

use crate::{config::Settings, load, render};

pub const STARTED: &str = "Studio Manager is up running...";
pub const TERMINATED: &str = "Studio Manager terminated.";
const MISSING_TOKENS: &str = "Missing data tokens.";

/// The outcome of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
  Reply(String),
  /// Blank line.
  Silent,
  Quit,
}

/// `Ok` carries a confirmation, `Err` a rejection. Both are printed.
type Reply = Result<String, String>;

type Handler = fn(&mut Interpreter, &[&str]) -> Reply;

const COMMANDS: &[(&str, Handler)] = &[
  ("AB", |i, t| i.enroll(TierKind::Basic, t)),
  ("AF", |i, t| i.enroll(TierKind::Family, t)),
  ("AP", |i, t| i.enroll(TierKind::Premium, t)),
  ("C", Interpreter::cancel),
  ("S", |i, _| Ok(render::schedule(&i.schedule, &i.registry, i.today()))),
  ("PM", |i, _| Ok(render::by_profile(&i.registry, i.today()))),
  ("PC", |i, _| Ok(render::by_location(&i.registry, i.today()))),
  ("PF", |i, _| Ok(render::dues(&i.registry, &i.settings.rates, i.today()))),
  ("R", |i, t| i.record(t, Attendee::Member)),
  ("U", |i, t| i.remove(t, Attendee::Member)),
  ("RG", |i, t| i.record(t, Attendee::Guest)),
  ("UG", |i, t| i.remove(t, Attendee::Guest)),
  ("LM", Interpreter::load_members_command),
  ("LS", Interpreter::load_schedule_command),
  ("SL", |_, _| Ok(render::locations())),
];

/// Whose attendance a class command is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attendee {
  Member,
  /// A guest brought by the member.
  Guest,
}

impl Attendee {
  fn tag(self) -> &'static str {
    match self {
      Self::Member => "",
      Self::Guest => "(guest) ",
    }
  }
}

pub struct Interpreter {
  registry: MemberRegistry,
  schedule: Schedule,
  settings: Settings,
  clock:    Box<dyn Clock>,
}

impl Interpreter {
  pub fn new(settings: Settings, clock: Box<dyn Clock>) -> Self {
    Self {
      registry: MemberRegistry::new(),
      schedule: Schedule::with_registration_limit(settings.max_registrations),
      settings,
      clock,
    }
  }

  pub fn registry(&self) -> &MemberRegistry { &self.registry }

  pub fn schedule(&self) -> &Schedule { &self.schedule }

  pub fn load_members(&mut self, path: &Path) -> anyhow::Result<usize> {
    let defaults = self.settings.seed_defaults();
    load::members_file(&mut self.registry, path, &defaults)
  }

  pub fn load_schedule(&mut self, path: &Path) -> anyhow::Result<usize> {
    load::schedule_file(&mut self.schedule, path)
  }

  fn today(&self) -> CalendarDate { self.clock.today() }

  /// Run one input line.
  pub fn execute(&mut self, line: &str) -> Step {
    if line.trim() == "Q" {
      return Step::Quit;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&code, args)) = tokens.split_first() else {
      return Step::Silent;
    };
    let Some((_, handler)) = COMMANDS.iter().find(|(c, _)| *c == code) else {
      tracing::debug!(code, "unknown command");
      return Step::Reply(format!("{code} is an invalid command!"));
    };
    tracing::debug!(code, tokens = args.len(), "dispatching command");
    match handler(self, args) {
      Ok(reply) => Step::Reply(reply),
      Err(rejection) => {
        tracing::debug!(code, %rejection, "command rejected");
        Step::Reply(rejection)
      }
    }
  }

  /// Read commands from `input` until `Q` or end of input, writing each reply
  /// to `output`.
  ///
  /// A line that is not valid UTF-8 is decoded lossily and handled like any
  /// other line. Only a failing stream ends the loop early.
  pub fn run<R: BufRead, W: Write>(
    &mut self,
    mut input: R,
    mut output: W,
  ) -> io::Result<()> {
    writeln!(output, "{STARTED}")?;
    let mut buf = Vec::new();
    loop {
      buf.clear();
      match input.read_until(b'\n', &mut buf) {
        Ok(0) => break,
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
        Err(err) => {
          tracing::error!(%err, "failed to read from the command stream");
          break;
        }
      }
      let line = String::from_utf8_lossy(&buf);
      if let Cow::Owned(_) = line {
        tracing::warn!("command line is not valid UTF-8");
      }
      match self.execute(&line) {
        Step::Reply(reply) => writeln!(output, "{reply}")?,
        Step::Silent => {}
        Step::Quit => break,
      }
    }
    writeln!(output, "{TERMINATED}")?;
    output.flush()
  }

  // ─── Membership commands ──────────────────────────────────────────────────

  /// `first last dob studio [guest_passes]`
  fn enroll(&mut self, kind: TierKind, tokens: &[&str]) -> Reply {
    let [first, last, dob_text, studio, rest @ ..] = tokens else {
      return Err(MISSING_TOKENS.to_owned());
    };
    let today = self.today();
    let dob = parse_dob(dob_text)?;
    check_birth_date(dob, today).map_err(|err| match err {
      Error::FutureDate(_) => format!("DOB {dob_text}: cannot be today or a future date!"),
      Error::Policy(PolicyViolation::Underage(age)) => {
        format!("DOB {dob_text}: must be {age} or older to join!")
      }
      _ => format!("DOB {dob_text}: invalid calendar date!"),
    })?;
    let home = Location::lookup(studio)
      .map_err(|_| format!("{studio}: invalid studio location!"))?;
    let tier = self.tier(kind, rest.first().copied())?;

    let profile = Profile::new(*first, *last, dob);
    let name = profile.full_name();
    if self.registry.add(Membership::enroll(profile, home, tier, today)) {
      tracing::info!(%name, tier = %kind, "member enrolled");
      Ok(format!("{name} added."))
    } else {
      Err(format!("{name} is already in the member database."))
    }
  }

  /// The initial tier state, given the optional guest-pass token.
  fn tier(&self, kind: TierKind, passes: Option<&str>) -> Result<Tier, String> {
    let passes = match passes {
      None => None,
      Some(text) => Some(
        text
          .parse::<u32>()
          .map_err(|_| format!("{text}: invalid number of guest passes!"))?,
      ),
    };
    match (kind, passes) {
      (TierKind::Basic, None | Some(0)) => Ok(Tier::basic()),
      (TierKind::Family, None | Some(1)) => Ok(Tier::family()),
      (TierKind::Family, Some(0)) => Ok(Tier::Family { guest_pass_available: false }),
      (TierKind::Premium, passes) => {
        Ok(Tier::premium(passes.unwrap_or(self.settings.premium_guest_passes)))
      }
      (_, Some(n)) => Err(format!("{n}: invalid number of guest passes for {kind}!")),
    }
  }

  /// `first last dob`
  fn cancel(&mut self, tokens: &[&str]) -> Reply {
    let [first, last, dob_text, ..] = tokens else {
      return Err(MISSING_TOKENS.to_owned());
    };
    let profile = Profile::new(*first, *last, parse_dob(dob_text)?);
    if !self.registry.remove(&profile) {
      return Err(format!("{first} {last} is not in the member database."));
    }
    let purged = self.schedule.withdraw(&profile);
    tracing::info!(profile = %profile, purged, "membership cancelled");
    Ok(format!("{first} {last} removed."))
  }

  // ─── Class commands ───────────────────────────────────────────────────────

  /// `offer instructor studio first last dob`
  fn class_request(tokens: &[&str]) -> Result<(ClassKey, Profile), String> {
    let [offer, instructor, studio, first, last, dob_text, ..] = tokens else {
      return Err(MISSING_TOKENS.to_owned());
    };
    let key = ClassKey::lookup(offer, instructor, studio).map_err(|err| match err {
      Error::UnknownInstructor(_) => format!("{instructor} - instructor does not exist."),
      Error::UnknownOffer(_) => format!("{offer} - class name does not exist."),
      _ => format!("{studio} - invalid studio location."),
    })?;
    let dob = parse_dob(dob_text)?;
    Ok((key, Profile::new(*first, *last, dob)))
  }

  fn record(&mut self, tokens: &[&str], who: Attendee) -> Reply {
    let (key, profile) = Self::class_request(tokens)?;
    let today = self.today();
    let Some(member) = self.registry.find_mut(&profile) else {
      return Err(not_enrolled(&profile));
    };
    let result = match who {
      Attendee::Member => self.schedule.confirm_attendance(key, member, today),
      Attendee::Guest => self.schedule.confirm_guest_attendance(key, member, today),
    };
    match result {
      Ok(slot) => Ok(format!(
        "{} {}attendance recorded {} at {}",
        member.profile().full_name(),
        who.tag(),
        slot.offer,
        slot.studio
      )),
      Err(err) => Err(rejection(&err, member, who)),
    }
  }

  fn remove(&mut self, tokens: &[&str], who: Attendee) -> Reply {
    let (key, profile) = Self::class_request(tokens)?;
    let Some(member) = self.registry.find_mut(&profile) else {
      return Err(not_enrolled(&profile));
    };
    let result = match who {
      Attendee::Member => self.schedule.remove_member(key, member),
      Attendee::Guest => self.schedule.remove_guest(key, member),
    };
    match result {
      Ok(slot) => Ok(format!(
        "{} {}is removed from {}",
        member.profile().full_name(),
        who.tag(),
        roster_place(&slot)
      )),
      Err(err) => Err(rejection(&err, member, who)),
    }
  }

  // ─── Seed commands ────────────────────────────────────────────────────────

  /// `path`
  fn load_members_command(&mut self, tokens: &[&str]) -> Reply {
    let [path, ..] = tokens else {
      return Err(MISSING_TOKENS.to_owned());
    };
    match self.load_members(Path::new(path)) {
      Ok(added) => Ok(format!("{added} members loaded from {path}.")),
      Err(err) => Err(format!("{err:#}")),
    }
  }

  /// `path`
  fn load_schedule_command(&mut self, tokens: &[&str]) -> Reply {
    let [path, ..] = tokens else {
      return Err(MISSING_TOKENS.to_owned());
    };
    match self.load_schedule(Path::new(path)) {
      Ok(added) => Ok(format!("{added} classes loaded from {path}.")),
      Err(err) => Err(format!("{err:#}")),
    }
  }
}

fn parse_dob(text: &str) -> Result<CalendarDate, String> {
  text
    .parse()
    .map_err(|_| format!("DOB {text}: invalid calendar date!"))
}

fn not_enrolled(profile: &Profile) -> String {
  format!(
    "{} {} is not in the member database.",
    profile.full_name(),
    profile.date_of_birth()
  )
}

fn city(location: Location) -> String { location.city().to_uppercase() }

/// `INSTRUCTOR, H:MM, CITY, ZIP, COUNTY`
fn roster_place(slot: &ClassSlot) -> String {
  format!("{}, {}, {}", slot.instructor, slot.time, slot.studio)
}

/// The message for a refused class command.
fn rejection(err: &Error, member: &Membership, who: Attendee) -> String {
  let name = member.profile().full_name();
  let Error::Policy(violation) = err else {
    return match err {
      Error::ClassNotFound(key) => format!(
        "{} by {} does not exist at {}",
        key.offer,
        key.instructor,
        city(key.studio)
      ),
      Error::NotAttending(slot) | Error::NoGuestAttending(slot) => {
        format!("{name} {}is not in {}", who.tag(), roster_place(slot))
      }
      other => other.to_string(),
    };
  };
  match violation {
    PolicyViolation::Expired(_) => format!(
      "{name} {} membership expired.",
      member.profile().date_of_birth()
    ),
    PolicyViolation::HomeStudioMismatch { home, attempted } => match who {
      Attendee::Member => format!(
        "{name} is attending a class at {} - [{}] home studio at {}",
        city(*attempted),
        member.kind(),
        city(*home)
      ),
      Attendee::Guest => format!(
        "{name} (guest) is attending a class at {} - home studio at {}",
        city(*attempted),
        city(*home)
      ),
    },
    PolicyViolation::TimeConflict(held) => format!(
      "Time conflict - {name} is in another class held at {} - {}, {}, {}",
      held.time,
      held.instructor,
      held.time,
      city(held.studio)
    ),
    PolicyViolation::GuestPassUnavailable => format!("{name} guest pass not available."),
    PolicyViolation::NoGuestPrivileges(kind) => format!("{name} [{kind}] - no guest pass."),
    PolicyViolation::AlreadyRegistered(_) | PolicyViolation::GuestAlreadyRegistered(_) => {
      format!("{name} {}is already in the class.", who.tag())
    }
    PolicyViolation::RegistrationLimit(limit) => {
      format!("{name} is already registered for the maximum of {limit} classes.")
    }
    PolicyViolation::Underage(_) => format!("{name}: {violation}"),
  }
}
