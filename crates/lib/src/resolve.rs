//! Resolution of native libraries to concrete file paths.
//!
//! Layout: `<base_dir>/<name>/<os-dir>[/x64]/<file>`, where `<os-dir>` is
//! `linux`, `windows` or `mac`. The `x64` segment is added only when the
//! platform architecture is exactly `amd64`; every other architecture,
//! including other spellings of 64-bit x86, uses the bare OS directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use natload_platform::{PlatformError, PlatformInfo};
use tracing::{debug, warn};

use crate::consts::X64_DIR;
use crate::error::{NativeError, Result};
use crate::library::NativeLibrary;

/// Relative native directory for a platform: `<os-dir>` or `<os-dir>/x64`.
pub fn native_dir_name(platform: &PlatformInfo) -> std::result::Result<PathBuf, PlatformError> {
  let mut dir = PathBuf::from(platform.family.native_dir()?);
  if platform.is_x64() {
    dir.push(X64_DIR);
  }
  Ok(dir)
}

/// Absolute directory holding the native files of `library` on `platform`.
///
/// The library name must be a single plain directory name.
pub fn library_dir(library: &NativeLibrary, platform: &PlatformInfo) -> Result<PathBuf> {
  let mut parts = Path::new(library.name()).components();
  if !matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None)) {
    return Err(NativeError::InvalidName {
      kind: "library name",
      value: library.name().to_string(),
    });
  }

  let dir = library.dir().join(native_dir_name(platform)?);
  std::path::absolute(&dir).map_err(|source| NativeError::Io { path: dir, source })
}

/// Ordered absolute paths of the files to load for `library` on `platform`.
///
/// With a dependency list for the platform's family, paths follow that list
/// exactly and the files are not checked for existence. Entries must be
/// relative paths of plain names; absolute paths and `..` are rejected, so
/// every file stays under the library directory. Without a list, the library
/// directory is scanned for regular files, in whatever order the filesystem
/// reports them.
pub fn resolve(library: &NativeLibrary, platform: &PlatformInfo) -> Result<Vec<PathBuf>> {
  let dir = library_dir(library, platform)?;
  let dependencies = library.dependencies(platform.family)?;
  debug!(library = %library.name(), dir = ?dir, dependencies = dependencies.len(), "resolving native library");

  if dependencies.is_empty() {
    scan_dir(&dir)
  } else {
    dependencies
      .iter()
      .map(|file| {
        if is_plain_relative(Path::new(file)) {
          Ok(dir.join(file))
        } else {
          Err(NativeError::InvalidName {
            kind: "dependency",
            value: file.clone(),
          })
        }
      })
      .collect()
  }
}

/// Non-empty path made only of normal components (no root, prefix, `.` or `..`).
fn is_plain_relative(path: &Path) -> bool {
  let mut components = path.components().peekable();
  components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
  let entries = fs::read_dir(dir).map_err(|source| match source.kind() {
    io::ErrorKind::NotFound => NativeError::DirectoryNotFound { path: dir.to_path_buf() },
    _ => NativeError::Io {
      path: dir.to_path_buf(),
      source,
    },
  })?;

  let mut files = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| NativeError::Io {
      path: dir.to_path_buf(),
      source,
    })?;
    let path = entry.path();
    if path.is_file() {
      files.push(path);
    }
  }

  if files.is_empty() {
    warn!(dir = ?dir, "no native files found");
  }
  Ok(files)
}
