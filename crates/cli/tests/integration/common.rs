//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_yaml::Value;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Parse a fixture as YAML.
pub fn fixture_yaml(name: &str) -> Value {
  serde_yaml::from_str(&fixture_content(name)).unwrap()
}

/// Read and parse a YAML file.
pub fn read_yaml(path: &Path) -> Value {
  let content = std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
  serde_yaml::from_str(&content).unwrap()
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the build-mapping
/// file, the sources and the outputs.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create an environment with `base.yaml` and `overlay.yaml` sources and
  /// the given build mapping as `confmerge.yml`.
  pub fn with_mapping(mapping: &str) -> Self {
    let env = Self::empty();
    env.write_file("base.yaml", &fixture_content("base.yaml"));
    env.write_file("overlay.yaml", &fixture_content("overlay.yaml"));
    env.write_file("confmerge.yml", mapping);
    env
  }

  /// Create an empty test environment.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap_or_else(|_| temp.path().to_path_buf());
    let config_path = root.join("confmerge.yml");
    Self { temp, config_path }
  }

  /// Root directory, canonicalized so it compares equal to paths the binary prints.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Absolute path of a file in the environment.
  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.root().join(relative_path)
  }

  /// Get a Command for the confmerge binary pointed at this environment's mapping.
  pub fn confmerge_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("confmerge");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(&self.config_path);
    cmd
  }
}
