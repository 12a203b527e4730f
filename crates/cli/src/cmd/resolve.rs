//! Resolve command implementation.
//!
//! Prints the absolute paths a library would load, one per line.

use anyhow::{Context, Result};
use natload_lib::resolve::resolve;
use natload_lib::{NativeLibrary, PlatformInfo};

use crate::output::{OutputFormat, print_json, print_warning};

/// Build a library under the configured root, with `deps` for the family of `platform`.
pub fn library_for(name: &str, deps: Vec<String>, platform: &PlatformInfo) -> Result<NativeLibrary> {
  let mut library = NativeLibrary::in_lib_dir(name).context("Failed to determine library root")?;
  if !deps.is_empty() {
    library.set_dependencies(platform.family, deps);
  }
  Ok(library)
}

pub fn cmd_resolve(name: &str, deps: Vec<String>, platform: &PlatformInfo, output: OutputFormat) -> Result<()> {
  let library = library_for(name, deps, platform)?;
  let paths = resolve(&library, platform).with_context(|| format!("Failed to resolve native library '{}'", name))?;

  if output.is_json() {
    return print_json(&paths);
  }

  if paths.is_empty() {
    print_warning(&format!("No native files found for '{}'", name));
  }
  for path in &paths {
    println!("{}", path.display());
  }
  Ok(())
}
