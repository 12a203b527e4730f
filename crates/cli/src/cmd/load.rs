//! Load command implementation.

use anyhow::{Context, Result};
use natload_lib::LibraryLoader;

use super::resolve::library_for;
use crate::LoadArgs;
use crate::output::{OutputFormat, print_json, print_success};

pub fn cmd_load(args: LoadArgs, output: OutputFormat) -> Result<()> {
  let mut loader = LibraryLoader::new();

  let loaded: Vec<String> = if let Some(path) = args.path {
    loader
      .load_path(&path)
      .with_context(|| format!("Failed to load '{}'", path.display()))?;
    vec![path.display().to_string()]
  } else if let Some(name) = args.by_name {
    loader
      .load_by_name(&name)
      .with_context(|| format!("Failed to load '{}' from the library search path", name))?;
    vec![name]
  } else {
    // clap guarantees one of path, by_name or name
    let name = args.name.unwrap_or_default();
    let platform = args.platform.platform();
    let library = library_for(&name, args.deps, &platform)?;
    loader
      .load_spec_on(&library, &platform)
      .with_context(|| format!("Failed to load native library '{}'", name))?
      .iter()
      .map(|path| path.display().to_string())
      .collect()
  };

  if output.is_json() {
    return print_json(&loaded);
  }

  for target in &loaded {
    print_success(&format!("Loaded {}", target));
  }
  Ok(())
}
