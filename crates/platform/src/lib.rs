//! Platform detection for natload
//!
//! This crate provides:
//! - OS family classification from raw OS name strings
//! - Memoized detection of the current platform (family, version, architecture)
//! - An application-owned registry of supported OS families

mod error;
mod family;
mod platform;
mod supported;

pub use error::PlatformError;
pub use family::OsFamily;
pub use platform::PlatformInfo;
pub use supported::SupportedPlatforms;
