//! Native library descriptions with per-OS dependency lists.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use natload_platform::OsFamily;

use crate::error::{NativeError, Result};
use crate::paths::lib_dir;

/// A named native library and the files to load for each OS family.
///
/// Files live under `<base_dir>/<name>/<os-dir>[/x64]`. An empty dependency
/// list for a family means "load every regular file in that directory"; a
/// non-empty list is loaded in exactly the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeLibrary {
  name: String,
  base_dir: PathBuf,
  dependencies: HashMap<OsFamily, Vec<String>>,
}

impl NativeLibrary {
  /// Create a library rooted at `base_dir` with no dependencies for any family.
  pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      base_dir: base_dir.into(),
      dependencies: OsFamily::ALL.into_iter().map(|family| (family, Vec::new())).collect(),
    }
  }

  /// Create a library under the configured library root (see [`lib_dir`]).
  pub fn in_lib_dir(name: impl Into<String>) -> Result<Self> {
    let base_dir = lib_dir().map_err(|source| NativeError::Io {
      path: PathBuf::from(crate::consts::LIB_DIR_NAME),
      source,
    })?;
    Ok(Self::new(name, base_dir))
  }

  /// Append a file to the dependency list of `family`.
  ///
  /// Append order is load order.
  pub fn add_dependency(&mut self, family: OsFamily, file: impl Into<String>) -> &mut Self {
    self.dependencies.entry(family).or_default().push(file.into());
    self
  }

  /// Replace the whole dependency list of `family`.
  ///
  /// Anything added before for this family is discarded.
  pub fn set_dependencies<I, S>(&mut self, family: OsFamily, files: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let list = self.dependencies.entry(family).or_default();
    list.clear();
    list.extend(files.into_iter().map(Into::into));
    self
  }

  /// Dependency list configured for `family`, possibly empty.
  pub fn dependencies(&self, family: OsFamily) -> Result<&[String]> {
    self
      .dependencies
      .get(&family)
      .map(Vec::as_slice)
      .ok_or(NativeError::Configuration { family })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn base_dir(&self) -> &Path {
    &self.base_dir
  }

  /// Directory of this library, `<base_dir>/<name>`.
  pub fn dir(&self) -> PathBuf {
    self.base_dir.join(&self.name)
  }
}
