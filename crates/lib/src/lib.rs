//! natload-lib: native library resolution and loading
//!
//! This crate provides:
//! - `NativeLibrary`: a named native library with per-OS dependency lists
//! - `resolve`: maps a library onto `<base>/<name>/<os>[/x64]` file paths
//! - `LibraryLoader`: loads resolved files into the running process

pub mod consts;
pub mod error;
pub mod library;
pub mod loader;
pub mod paths;
pub mod resolve;

pub use error::{NativeError, Result};
pub use library::NativeLibrary;
pub use loader::{LibraryLoader, LoadBackend, SystemBackend};
pub use natload_platform::{OsFamily, PlatformInfo, SupportedPlatforms};
