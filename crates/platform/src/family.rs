//! OS family classification

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlatformError;

/// Coarse operating system classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
  /// Linux and other Unix-like systems
  Linux,
  Windows,
  Osx,
  Unknown,
}

/// Ordered alias table used by [`OsFamily::classify`].
///
/// Order is significant: families are checked top to bottom and the first
/// matching alias wins, so an alias must never be a substring of a name that
/// belongs to a family listed above it. Short aliases over-match: "darwin"
/// contains "win".
const ALIASES: [(OsFamily, &[&str]); 3] = [
  (OsFamily::Linux, &["linux", "lin", "unix"]),
  (OsFamily::Windows, &["windows", "win"]),
  (OsFamily::Osx, &["mac"]),
];

impl OsFamily {
  /// Every family in declaration order
  pub const ALL: [OsFamily; 4] = [OsFamily::Linux, OsFamily::Windows, OsFamily::Osx, OsFamily::Unknown];

  /// Classify a raw OS name (e.g. "Linux", "Windows 11", "Mac OS X")
  ///
  /// Matching is case-insensitive. A family matches when the name equals one
  /// of its aliases or contains it. Names matching nothing are `Unknown`.
  pub fn classify(raw_name: &str) -> Self {
    let name = raw_name.to_lowercase();

    for (family, aliases) in ALIASES {
      if aliases.iter().any(|alias| name == *alias || name.contains(alias)) {
        return family;
      }
    }

    OsFamily::Unknown
  }

  /// Returns the aliases used to recognize this family
  pub fn aliases(&self) -> &'static [&'static str] {
    ALIASES
      .iter()
      .find(|(family, _)| family == self)
      .map(|(_, aliases)| *aliases)
      .unwrap_or(&[])
  }

  /// Returns the directory name holding this family's native files
  pub fn native_dir(&self) -> Result<&'static str, PlatformError> {
    match self {
      Self::Linux => Ok("linux"),
      Self::Windows => Ok("windows"),
      Self::Osx => Ok("mac"),
      Self::Unknown => Err(PlatformError::Unsupported {
        name: self.as_str().to_string(),
      }),
    }
  }

  /// Returns the lowercase string identifier for this family
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::Windows => "windows",
      Self::Osx => "osx",
      Self::Unknown => "unknown",
    }
  }
}

impl fmt::Display for OsFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
