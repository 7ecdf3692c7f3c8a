//! Error types for the seed-file parsers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("line {line}: expected {expected} fields, found {found}")]
  FieldCount {
    line:     usize,
    expected: usize,
    found:    usize,
  },

  #[error("line {line}: {source}")]
  Field {
    line:   usize,
    #[source]
    source: studio_core::Error,
  },
}

impl Error {
  /// The 1-based line the error was found on.
  pub fn line(&self) -> usize {
    match self {
      Self::FieldCount { line, .. } | Self::Field { line, .. } => *line,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
