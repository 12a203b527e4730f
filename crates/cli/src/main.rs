mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use natload_lib::PlatformInfo;
use natload_lib::consts::APP_NAME;
use tracing_subscriber::EnvFilter;

use cmd::{cmd_info, cmd_load, cmd_resolve};
use output::OutputFormat;

/// natload - resolve and load OS-specific native libraries
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t, global = true)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the detected platform
  Info,

  /// Print the native files a library resolves to
  Resolve {
    /// Library directory name under the library root
    name: String,

    /// Dependency file for the current OS family, in load order (repeatable)
    #[arg(long = "dep", value_name = "FILE")]
    deps: Vec<String>,

    #[command(flatten)]
    platform: PlatformArgs,
  },

  /// Load native files into this process
  Load(LoadArgs),
}

/// Overrides for the detected platform values
///
/// Only meaningful together with a library name.
#[derive(Args, Debug, Default)]
pub struct PlatformArgs {
  /// Raw OS name to classify instead of the detected one
  #[arg(long, value_name = "NAME", requires = "name")]
  pub os_name: Option<String>,

  /// OS version to report instead of the detected one
  #[arg(long, value_name = "VERSION", requires = "name")]
  pub os_version: Option<String>,

  /// Architecture identifier instead of the detected one (e.g. amd64)
  #[arg(long, value_name = "ARCH", requires = "name")]
  pub arch: Option<String>,
}

impl PlatformArgs {
  /// The detected platform with any overrides applied
  pub fn platform(&self) -> PlatformInfo {
    let current = PlatformInfo::current();
    if self.os_name.is_none() && self.os_version.is_none() && self.arch.is_none() {
      return current.clone();
    }
    PlatformInfo::from_raw(
      self.os_name.as_deref().unwrap_or(&current.name),
      self.os_version.as_deref().unwrap_or(&current.version),
      self.arch.as_deref().unwrap_or(&current.architecture),
    )
  }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["name", "path", "by_name"])))]
pub struct LoadArgs {
  /// Library directory name under the library root
  pub name: Option<String>,

  /// Dependency file for the current OS family, in load order (repeatable)
  #[arg(long = "dep", value_name = "FILE", requires = "name")]
  pub deps: Vec<String>,

  /// Load a single file
  #[arg(long, value_name = "FILE")]
  pub path: Option<PathBuf>,

  /// Load a library through the system search path (e.g. "z" for libz)
  #[arg(long, value_name = "NAME")]
  pub by_name: Option<String>,

  #[command(flatten)]
  pub platform: PlatformArgs,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Info => cmd_info(cli.format),
    Commands::Resolve { name, deps, platform } => cmd_resolve(&name, deps, &platform.platform(), cli.format),
    Commands::Load(args) => cmd_load(args, cli.format),
  }
}
