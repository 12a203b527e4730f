//! Error types for natload-lib

use std::io;
use std::path::PathBuf;

use natload_platform::{OsFamily, PlatformError};
use thiserror::Error;

/// Errors that can occur while resolving or loading native libraries
#[derive(Debug, Error)]
pub enum NativeError {
  #[error(transparent)]
  UnsupportedPlatform(#[from] PlatformError),

  #[error("Native library directory not found: {}", path.display())]
  DirectoryNotFound { path: PathBuf },

  #[error("Failed to load native library '{target}': {reason}")]
  Load { target: String, reason: String },

  #[error("Invalid {kind} '{value}': must be a relative name inside the library directory")]
  InvalidName { kind: &'static str, value: String },

  #[error("No dependency list configured for OS family '{family}'")]
  Configuration { family: OsFamily },

  #[error("IO error for '{}': {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

pub type Result<T> = std::result::Result<T, NativeError>;
