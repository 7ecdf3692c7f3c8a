//! Core types for the Studio Manager membership and class roster.
//!
//! This crate is free of file and console I/O. The seed-file parsers and the
//! command interpreter depend on it; it depends on nothing but small utility
//! crates.

pub mod billing;
pub mod calendar;
pub mod catalog;
pub mod error;
pub mod membership;
pub mod profile;
pub mod registry;
pub mod schedule;

pub use error::{Error, ErrorKind, PolicyViolation, Result};
