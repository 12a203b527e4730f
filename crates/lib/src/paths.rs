use crate::consts::{LIB_DIR_ENV, LIB_DIR_NAME};
use std::io;
use std::path::PathBuf;

/// Returns the root directory holding native libraries
///
/// `NATLOAD_LIB_DIR` takes precedence; otherwise `<cwd>/lib`.
pub fn lib_dir() -> io::Result<PathBuf> {
  match std::env::var_os(LIB_DIR_ENV) {
    Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
    _ => Ok(std::env::current_dir()?.join(LIB_DIR_NAME)),
  }
}
