//! Types for the merge engine.
//!
//! This module defines the error type shared by path resolution, graph
//! resolution, YAML I/O and building, and the summary of a build run.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while resolving, loading, merging or writing.
#[derive(Debug, Error)]
pub enum BuildError {
  /// An output identifier resolved to zero or several paths, or collides
  /// with another output.
  #[error("invalid output path '{identifier}': {reason}")]
  InvalidOutputPath { identifier: String, reason: String },

  /// An input neither exists on disk nor is a declared output.
  #[error("source file not found: {}", path.display())]
  SourceNotFound { path: PathBuf },

  /// A declared output transitively depends on itself.
  #[error("cyclic dependency detected: {chain}")]
  CyclicDependency { chain: String },

  /// A source file is not valid YAML.
  #[error("failed to parse {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },

  /// A merged document could not be serialized.
  #[error("failed to serialize {}: {source}", path.display())]
  Serialize { path: PathBuf, source: serde_yaml::Error },

  /// Reading, writing or walking the filesystem failed.
  #[error("io error on {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },

  /// A glob pattern could not be compiled.
  #[error("invalid glob pattern '{pattern}': {source}")]
  InvalidPattern { pattern: String, source: glob::PatternError },

  /// `~` was used but the home directory could not be determined.
  #[error("cannot expand '{identifier}': home directory is unavailable")]
  HomeDirUnavailable { identifier: String },

  /// `build` was asked for a path that is not a key of the graph.
  #[error("not a declared output: {}", path.display())]
  UnknownOutput { path: PathBuf },
}

impl BuildError {
  pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
    BuildError::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}

/// Result of a completed build run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
  /// Output files written, in graph order.
  pub written: Vec<PathBuf>,

  /// How many `build` calls were answered from the cache.
  pub cache_hits: usize,
}
