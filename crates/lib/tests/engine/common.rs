//! Shared helpers for engine tests.

use std::path::{Path, PathBuf};

use confmerge_lib::{BuildError, BuildSpec, BuildSummary, ResolvedGraph, build_all};
use serde_yaml::Value;
use tempfile::TempDir;

/// A temp directory holding sources and a build mapping.
pub struct Workspace {
  pub temp: TempDir,
}

impl Workspace {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn write(&self, relative_path: &str, content: &str) -> &Self {
    let path = self.path(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    self
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Parse `mapping`, resolve it here and build everything.
  pub fn build(&self, mapping: &str) -> Result<BuildSummary, BuildError> {
    let spec = BuildSpec::from_yaml_str(mapping).unwrap();
    let graph = ResolvedGraph::resolve(&spec, self.root())?;
    build_all(&graph)
  }

  pub fn read(&self, relative_path: &str) -> Value {
    let content = std::fs::read_to_string(self.path(relative_path)).unwrap();
    serde_yaml::from_str(&content).unwrap()
  }
}
