use anyhow::Result;
use natload_lib::PlatformInfo;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let info = PlatformInfo::current();

  if output.is_json() {
    return print_json(info);
  }

  println!("{}", info.report());
  print_stat("Family", info.family.as_str());
  Ok(())
}
