//! `studio`: the Studio Manager command interpreter.
//!
//! Reads commands from stdin and writes replies to stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! studio --members members.txt --schedule classes.txt
//! studio --config studio.toml --today 10/19/2026 --verbose
//! ```

mod config;
mod interpreter;
mod load;
mod render;

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use studio_core::calendar::{CalendarDate, Clock, FixedClock, SystemClock};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{config::StudioConfig, interpreter::Interpreter};

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "studio", version, about = "Fitness studio membership and class roster")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", env = "STUDIO_CONFIG")]
  config: Option<PathBuf>,

  /// Member seed file to load before reading commands.
  #[arg(long, value_name = "FILE")]
  members: Option<PathBuf>,

  /// Class seed file to load before reading commands.
  #[arg(long, value_name = "FILE")]
  schedule: Option<PathBuf>,

  /// Use this date as today (M/D/YYYY) instead of the system clock.
  #[arg(long, value_name = "DATE")]
  today: Option<CalendarDate>,

  /// Log at debug level.
  #[arg(short, long)]
  verbose: bool,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let cfg = StudioConfig::load(args.config.as_deref())
    .context("failed to load configuration")?;

  // CLI flags override the config sources.
  let clock: Box<dyn Clock> = match args.today.or(cfg.today) {
    Some(today) => {
      tracing::info!(%today, "clock pinned");
      Box::new(FixedClock(today))
    }
    None => Box::new(SystemClock),
  };
  let mut interpreter = Interpreter::new(cfg.settings(), clock);

  if let Some(path) = args.members.as_ref().or(cfg.members.as_ref()) {
    interpreter.load_members(path)?;
  }
  if let Some(path) = args.schedule.as_ref().or(cfg.schedule.as_ref()) {
    interpreter.load_schedule(path)?;
  }
  tracing::debug!(
    members = interpreter.registry().len(),
    classes = interpreter.schedule().len(),
    "ready"
  );

  interpreter
    .run(io::stdin().lock(), io::stdout().lock())
    .context("failed to write to stdout")
}
