//! Application-owned set of supported OS families

use std::collections::HashSet;

use crate::family::OsFamily;
use crate::platform::PlatformInfo;

/// OS families an application declares it supports
///
/// Purely advisory: resolution and loading never consult it. No internal
/// locking; wrap it in a lock to share it across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedPlatforms {
  families: HashSet<OsFamily>,
}

impl SupportedPlatforms {
  pub fn new() -> Self {
    Self::default()
  }

  /// Mark a family as supported. Adding twice is a no-op.
  pub fn add(&mut self, family: OsFamily) {
    self.families.insert(family);
  }

  /// Remove a family. Removing an absent family is a no-op.
  pub fn remove(&mut self, family: OsFamily) {
    self.families.remove(&family);
  }

  pub fn is_supported(&self, family: OsFamily) -> bool {
    self.families.contains(&family)
  }

  /// Snapshot of all supported families
  pub fn all(&self) -> HashSet<OsFamily> {
    self.families.clone()
  }

  /// Whether the family of the running process is supported
  pub fn supports_current(&self) -> bool {
    self.is_supported(PlatformInfo::current().family)
  }
}

impl FromIterator<OsFamily> for SupportedPlatforms {
  fn from_iter<I: IntoIterator<Item = OsFamily>>(iter: I) -> Self {
    Self {
      families: iter.into_iter().collect(),
    }
  }
}
