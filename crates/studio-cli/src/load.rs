//! Reading seed files from disk.

use std::path::Path;

use anyhow::Context;
use studio_core::{registry::MemberRegistry, schedule::Schedule};
use studio_seed::SeedDefaults;

pub fn members_file(
  registry: &mut MemberRegistry,
  path: &Path,
  defaults: &SeedDefaults,
) -> anyhow::Result<usize> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read member file {}", path.display()))?;
  studio_seed::load_members(registry, &text, defaults)
    .with_context(|| format!("failed to load member file {}", path.display()))
}

pub fn schedule_file(schedule: &mut Schedule, path: &Path) -> anyhow::Result<usize> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read class file {}", path.display()))?;
  studio_seed::load_schedule(schedule, &text)
    .with_context(|| format!("failed to load class file {}", path.display()))
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn seed(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn loads_members_from_disk() {
    let file = seed(
      "B Jerry Brown 6/30/1979 11/19/2026 Bridgewater\n\
       P Mary Lindsey 12/1/1989 10/19/2027 Franklin\n",
    );
    let mut registry = MemberRegistry::new();
    let added = members_file(&mut registry, file.path(), &SeedDefaults::default()).unwrap();
    assert_eq!(added, 2);
    assert_eq!(registry.len(), 2);
  }

  #[test]
  fn loads_classes_from_disk() {
    let file = seed("PILATES JENNIFER MORNING BRIDGEWATER\nCARDIO KIM EVENING EDISON\n");
    let mut schedule = Schedule::new();
    assert_eq!(schedule_file(&mut schedule, file.path()).unwrap(), 2);
  }

  #[test]
  fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let err = schedule_file(&mut Schedule::new(), &path).unwrap_err();
    assert!(err.to_string().contains("nope.txt"));
  }

  #[test]
  fn parse_errors_keep_the_line_number() {
    let file = seed("PILATES JENNIFER MORNING BRIDGEWATER\nYOGA KIM EVENING EDISON\n");
    let mut schedule = Schedule::new();
    let err = schedule_file(&mut schedule, file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));
    assert!(schedule.is_empty());
  }
}
