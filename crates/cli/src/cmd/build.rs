//! Implementation of the `confmerge` build.
//!
//! Loads the build-mapping file, resolves it against the file's directory and
//! writes every output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use confmerge_lib::consts::DEFAULT_CONFIG_FILE;
use confmerge_lib::{BuildSpec, Builder, ConfigError, ResolvedGraph};

use crate::output::{format_count, print_info, print_stat, print_success};

pub struct BuildArgs {
  pub config: Option<PathBuf>,
  pub verbose: bool,
  pub groups: Vec<String>,
}

/// Build every output declared in the build-mapping file.
///
/// Relative identifiers are resolved against the directory containing the
/// build-mapping file. When groups are given, only those groups are built.
pub fn cmd_build(args: &BuildArgs) -> Result<()> {
  let config = locate_config(args.config.as_deref())?;

  if args.verbose {
    print_info(&format!("Using configuration file: {}", config.display()));
  }

  let spec = BuildSpec::load(&config).map_err(|e| {
    let message = match e {
      ConfigError::Read { .. } | ConfigError::Parse(_) => "Failed to load configuration file",
      _ => "Invalid configuration format",
    };
    anyhow::Error::new(e).context(message)
  })?;

  let spec = if args.groups.is_empty() {
    spec
  } else {
    spec.filter_groups(args.groups.as_slice()).context("Invalid group filter")?
  };

  let base_dir = match config.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };
  debug!(base_dir = %base_dir.display(), groups = spec.len(), "resolving build graph");

  let graph = ResolvedGraph::resolve(&spec, &base_dir).context("Failed to build configurations")?;
  let summary = Builder::new(&graph)
    .build_all()
    .context("Failed to build configurations")?;

  print_success(&format!("Built {}", format_count(summary.written.len(), "output")));
  for path in &summary.written {
    print_stat("wrote", &path.display().to_string());
  }

  if args.verbose {
    print_stat("cached", &summary.cache_hits.to_string());
    print_info("Configuration build completed successfully");
  }

  Ok(())
}

fn locate_config(explicit: Option<&Path>) -> Result<PathBuf> {
  match explicit {
    Some(path) => {
      if !path.exists() {
        bail!("Config file not found: {}", path.display());
      }
      Ok(path.to_path_buf())
    }
    None => {
      let path = PathBuf::from(DEFAULT_CONFIG_FILE);
      if !path.exists() {
        bail!(
          "No configuration file specified and {} not found in current directory",
          DEFAULT_CONFIG_FILE
        );
      }
      Ok(path)
    }
  }
}
