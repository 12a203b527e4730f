//! Current platform detection

use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use sysinfo::System;
use tracing::debug;

use crate::family::OsFamily;

/// Canonical identifier for 64-bit x86
const X64_ARCH: &str = "amd64";

static CURRENT: OnceLock<PlatformInfo> = OnceLock::new();

/// Classified platform: OS family plus the raw name, version and architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
  pub family: OsFamily,
  /// Lower-cased raw OS name
  pub name: String,
  pub version: String,
  pub architecture: String,
}

impl PlatformInfo {
  /// Returns the platform of the running process
  ///
  /// Detected on first call and cached for the lifetime of the process. Later
  /// changes to the environment are never picked up.
  pub fn current() -> &'static PlatformInfo {
    CURRENT.get_or_init(Self::detect)
  }

  /// Build platform info from an explicit environment snapshot
  pub fn from_raw(name: impl Into<String>, version: impl Into<String>, architecture: impl Into<String>) -> Self {
    let name = name.into().to_lowercase();
    Self {
      family: OsFamily::classify(&name),
      name,
      version: version.into(),
      architecture: architecture.into(),
    }
  }

  fn detect() -> Self {
    let info = Self::from_raw(
      std::env::consts::OS,
      System::os_version().unwrap_or_default(),
      arch_identifier(std::env::consts::ARCH),
    );
    debug!(family = %info.family, name = %info.name, version = %info.version, arch = %info.architecture, "detected platform");
    info
  }

  /// Multi-line human readable summary
  pub fn report(&self) -> String {
    format!(
      "System info:\nOperating system: '{}'.\nSystem version: '{}'.\nSystem architecture: '{}'.",
      self.name, self.version, self.architecture
    )
  }

  /// True when the architecture is exactly the canonical 64-bit x86 identifier
  pub fn is_x64(&self) -> bool {
    self.architecture == X64_ARCH
  }

  pub fn is_linux(&self) -> bool {
    self.family == OsFamily::Linux
  }

  pub fn is_windows(&self) -> bool {
    self.family == OsFamily::Windows
  }

  pub fn is_osx(&self) -> bool {
    self.family == OsFamily::Osx
  }
}

impl fmt::Display for PlatformInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "OS [Name: {}", self.name.to_uppercase())?;
    if !self.version.is_empty() {
      write!(f, " Version:{}", self.version)?;
    }
    if !self.architecture.is_empty() {
      write!(f, " Architecture:{}", self.architecture)?;
    }
    write!(f, "]")
  }
}

/// Map a Rust target architecture to the identifier reported in `PlatformInfo`
fn arch_identifier(arch: &str) -> &str {
  match arch {
    "x86_64" => X64_ARCH,
    other => other,
  }
}
