//! Test utilities for confmerge-lib.
//!
//! Helpers for laying out source trees inside a temporary directory and
//! reading merged documents back.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

/// Write `content` to `relative` under `dir`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, content).unwrap();
  path
}

/// Parse an inline YAML snippet.
pub fn yaml(source: &str) -> Value {
  serde_yaml::from_str(source).unwrap_or_else(|e| panic!("invalid test yaml: {}", e))
}

/// Read and parse a YAML file written by the engine.
pub fn read_yaml(path: &Path) -> Value {
  let content = std::fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
  serde_yaml::from_str(&content).unwrap()
}

/// The two documents used across the merge tests.
pub const BASE_YAML: &str = r#"
database:
  host: localhost
  port: 5432
  credentials:
    username: admin
logging:
  level: info
"#;

pub const OVERLAY_YAML: &str = r#"
database:
  port: 5433
  credentials:
    password: secret
logging:
  format: json
"#;

/// Expected result of merging [`OVERLAY_YAML`] onto [`BASE_YAML`].
pub const MERGED_YAML: &str = r#"
database:
  host: localhost
  port: 5433
  credentials:
    username: admin
    password: secret
logging:
  level: info
  format: json
"#;
