//! Loading native files into the running process.
//!
//! Loads are global and irreversible: once a file is mapped into the process
//! it stays there. Nothing here caches or deduplicates, so loading the same
//! file twice asks the OS twice, and what the OS does then is
//! platform-dependent. Callers must serialize loads of the same target.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use libloading::Library;
use natload_platform::PlatformInfo;
use tracing::{debug, info};

use crate::error::{NativeError, Result};
use crate::library::NativeLibrary;
use crate::resolve::resolve;

/// Primitive load operations.
pub trait LoadBackend {
  /// Load the file at `path`.
  fn load_file(&mut self, path: &Path) -> Result<()>;

  /// Load a platform-specific file name (e.g. `libfoo.so`) through the
  /// system library search path.
  fn load_named(&mut self, filename: &OsStr) -> Result<()>;
}

/// Loads through the OS dynamic loader (`dlopen` / `LoadLibraryExW`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackend;

impl SystemBackend {
  fn open(target: &OsStr) -> Result<()> {
    // SAFETY: loading a library runs its initialisers. The files loaded here
    // are supplied by the embedding application, which vouches for them.
    let library = unsafe { Library::new(target) }.map_err(|e| NativeError::Load {
      target: target.to_string_lossy().into_owned(),
      reason: e.to_string(),
    })?;
    // The handle is never closed
    std::mem::forget(library);
    Ok(())
  }
}

impl LoadBackend for SystemBackend {
  fn load_file(&mut self, path: &Path) -> Result<()> {
    if path.is_file() {
      return Self::open(path.as_os_str());
    }
    let reason = if path.exists() { "not a regular file" } else { "file not found" };
    Err(NativeError::Load {
      target: path.display().to_string(),
      reason: reason.to_string(),
    })
  }

  fn load_named(&mut self, filename: &OsStr) -> Result<()> {
    Self::open(filename)
  }
}

/// Loads native files by path, by [`NativeLibrary`], or by bare name.
#[derive(Debug, Default)]
pub struct LibraryLoader<B = SystemBackend> {
  backend: B,
}

impl LibraryLoader {
  pub fn new() -> Self {
    Self::default()
  }
}

impl<B: LoadBackend> LibraryLoader<B> {
  pub fn with_backend(backend: B) -> Self {
    Self { backend }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  /// Load the file at `path`, made absolute against the working directory.
  pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let path = std::path::absolute(path).map_err(|source| NativeError::Load {
      target: path.display().to_string(),
      reason: source.to_string(),
    })?;
    info!(path = ?path, "loading native library");
    self.backend.load_file(&path)
  }

  /// Resolve `library` for the current platform and load every file in order.
  ///
  /// See [`load_spec_on`](Self::load_spec_on).
  pub fn load_spec(&mut self, library: &NativeLibrary) -> Result<Vec<PathBuf>> {
    self.load_spec_on(library, PlatformInfo::current())
  }

  /// Resolve `library` for `platform` and load every file in order.
  ///
  /// Stops at the first failure. Files loaded before the failure stay loaded.
  /// Returns the loaded paths.
  pub fn load_spec_on(&mut self, library: &NativeLibrary, platform: &PlatformInfo) -> Result<Vec<PathBuf>> {
    let paths = resolve(library, platform)?;
    debug!(library = %library.name(), files = paths.len(), "loading resolved native files");
    for path in &paths {
      self.load_path(path)?;
    }
    Ok(paths)
  }

  /// Load `name` through the system search path.
  ///
  /// `name` is the bare library name: `foo` becomes `libfoo.so`, `foo.dll` or
  /// `libfoo.dylib` depending on the platform.
  pub fn load_by_name(&mut self, name: &str) -> Result<()> {
    let filename = libloading::library_filename(name);
    info!(name = %name, filename = ?filename, "loading native library from search path");
    self.backend.load_named(&filename)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use natload_platform::OsFamily;
  use std::ffi::OsString;
  use std::fs;
  use tempfile::TempDir;
  use tracing_test::traced_test;

  /// Records every attempt and fails for files that do not exist.
  #[derive(Debug, Default)]
  struct RecordingBackend {
    files: Vec<PathBuf>,
    names: Vec<OsString>,
  }

  impl LoadBackend for RecordingBackend {
    fn load_file(&mut self, path: &Path) -> Result<()> {
      self.files.push(path.to_path_buf());
      if path.is_file() {
        Ok(())
      } else {
        Err(NativeError::Load {
          target: path.display().to_string(),
          reason: "file not found".to_string(),
        })
      }
    }

    fn load_named(&mut self, filename: &OsStr) -> Result<()> {
      self.names.push(filename.to_os_string());
      Ok(())
    }
  }

  fn linux_x64() -> PlatformInfo {
    PlatformInfo::from_raw("Linux", "", "amd64")
  }

  fn native_dir(temp: &TempDir, name: &str) -> PathBuf {
    let dir = temp.path().join(name).join("linux").join("x64");
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn loads_dependencies_in_order() {
    let temp = TempDir::new().unwrap();
    let dir = native_dir(&temp, "lwjgl");
    fs::write(dir.join("libopenal.so"), b"").unwrap();
    fs::write(dir.join("liblwjgl.so"), b"").unwrap();

    let mut lib = NativeLibrary::new("lwjgl", temp.path());
    lib.set_dependencies(OsFamily::Linux, ["libopenal.so", "liblwjgl.so"]);

    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    let loaded = loader.load_spec_on(&lib, &linux_x64()).unwrap();

    let expected = vec![dir.join("libopenal.so"), dir.join("liblwjgl.so")];
    assert_eq!(loaded, expected);
    assert_eq!(loader.backend().files, expected);
  }

  #[test]
  fn stops_at_first_failure() {
    let temp = TempDir::new().unwrap();
    let dir = native_dir(&temp, "lwjgl");
    fs::write(dir.join("present.so"), b"").unwrap();

    let mut lib = NativeLibrary::new("lwjgl", temp.path());
    lib.set_dependencies(OsFamily::Linux, ["missing.so", "present.so"]);

    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    let err = loader.load_spec_on(&lib, &linux_x64()).unwrap_err();

    assert!(matches!(err, NativeError::Load { .. }));
    assert_eq!(loader.backend().files, vec![dir.join("missing.so")]);
  }

  #[test]
  fn missing_scan_dir_loads_nothing() {
    let temp = TempDir::new().unwrap();
    let lib = NativeLibrary::new("absent", temp.path());

    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    let err = loader.load_spec_on(&lib, &linux_x64()).unwrap_err();

    assert!(matches!(err, NativeError::DirectoryNotFound { .. }));
    assert!(loader.backend().files.is_empty());
  }

  #[test]
  fn unknown_platform_loads_nothing() {
    let lib = NativeLibrary::new("lwjgl", "/opt/lib");
    let platform = PlatformInfo::from_raw("plan9", "", "amd64");

    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    let err = loader.load_spec_on(&lib, &platform).unwrap_err();

    assert!(matches!(err, NativeError::UnsupportedPlatform(_)));
    assert!(loader.backend().files.is_empty());
  }

  #[test]
  fn repeated_loads_are_not_deduplicated() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("libfoo.so");
    fs::write(&file, b"").unwrap();

    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    loader.load_path(&file).unwrap();
    loader.load_path(&file).unwrap();
    assert_eq!(loader.backend().files, vec![file.clone(), file]);
  }

  #[test]
  fn load_path_makes_relative_paths_absolute() {
    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    let _ = loader.load_path("libnothing.so");
    let recorded = &loader.backend().files[0];
    assert!(recorded.is_absolute());
    assert!(recorded.ends_with("libnothing.so"));
  }

  #[test]
  fn load_by_name_maps_platform_filename() {
    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    loader.load_by_name("foo").unwrap();

    #[cfg(target_os = "linux")]
    assert_eq!(loader.backend().names, vec![OsString::from("libfoo.so")]);
    #[cfg(target_os = "macos")]
    assert_eq!(loader.backend().names, vec![OsString::from("libfoo.dylib")]);
    #[cfg(windows)]
    assert_eq!(loader.backend().names, vec![OsString::from("foo.dll")]);
  }

  #[test]
  #[traced_test]
  fn logs_each_loaded_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("liblogged.so");
    fs::write(&file, b"").unwrap();

    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    loader.load_path(&file).unwrap();
    assert!(logs_contain("loading native library"));
    assert!(logs_contain("liblogged.so"));
  }

  #[test]
  fn system_backend_rejects_missing_file() {
    let temp = TempDir::new().unwrap();
    let mut loader = LibraryLoader::new();
    let err = loader.load_path(temp.path().join("libabsent.so")).unwrap_err();
    match err {
      NativeError::Load { target, reason } => {
        assert!(target.ends_with("libabsent.so"));
        assert_eq!(reason, "file not found");
      }
      other => panic!("expected Load, got {other:?}"),
    }
  }

  #[test]
  fn system_backend_rejects_directory() {
    let temp = TempDir::new().unwrap();
    let mut loader = LibraryLoader::new();
    match loader.load_path(temp.path()).unwrap_err() {
      NativeError::Load { reason, .. } => assert_eq!(reason, "not a regular file"),
      other => panic!("expected Load, got {other:?}"),
    }
  }

  #[test]
  fn empty_path_is_a_load_error() {
    let mut loader = LibraryLoader::with_backend(RecordingBackend::default());
    let err = loader.load_path("").unwrap_err();
    assert!(matches!(err, NativeError::Load { .. }));
    assert!(loader.backend().files.is_empty());
  }

  #[test]
  fn system_backend_rejects_non_library_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("libgarbage.so");
    fs::write(&file, b"this is not a shared object").unwrap();

    let mut loader = LibraryLoader::new();
    assert!(matches!(loader.load_path(&file), Err(NativeError::Load { .. })));
  }

  #[test]
  fn system_backend_rejects_unknown_name() {
    let mut loader = LibraryLoader::new();
    let err = loader.load_by_name("natload-definitely-not-installed").unwrap_err();
    assert!(matches!(err, NativeError::Load { .. }));
  }
}
