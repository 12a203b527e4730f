//! Error types for natload-platform

use thiserror::Error;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("Unsupported platform: no native directory for OS '{name}'")]
  Unsupported { name: String },
}
