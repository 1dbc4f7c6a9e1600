use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use confmerge_lib::consts::APP_NAME;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{BuildArgs, cmd_build};
use output::print_error;

/// confmerge - Build YAML configurations by merging multiple files
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the build-mapping file (default: confmerge.yml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Only build the named group (repeatable)
  #[arg(short, long = "group", value_name = "NAME")]
  groups: Vec<String>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  let args = BuildArgs {
    config: cli.config,
    verbose: cli.verbose,
    groups: cli.groups,
  };

  match cmd_build(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug logs for this workspace.
fn init_tracing(verbose: bool) {
  let default_directives = if verbose {
    "warn,confmerge=debug,confmerge_lib=debug"
  } else {
    "warn"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
