//! The build-mapping file.
//!
//! A build-mapping file is a YAML mapping of group names to groups. Each
//! group takes one of two forms:
//!
//! ```yaml
//! # legacy: the key is the output, the value its inputs
//! out/app.yaml: [base.yaml, overlay.yaml]
//!
//! # object: several outputs share one input list
//! services:
//!   input: [base.yaml, "services/*.yaml"]
//!   output: [out/a.yaml, out/b.yaml]
//! ```
//!
//! Both are normalised into [`BuildGroup`]. Group declaration order is kept.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a build-mapping file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The file could not be read.
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  /// The file is not valid YAML.
  #[error("invalid yaml: {0}")]
  Parse(#[from] serde_yaml::Error),

  /// The document root is not a mapping of groups.
  #[error("invalid configuration format: {0}")]
  InvalidFormat(String),

  /// A group value has neither accepted shape.
  #[error("invalid group '{group}': {reason}")]
  InvalidGroup { group: String, reason: String },

  /// A group filter named a group that is not declared.
  #[error("unknown group '{name}' (declared: {declared})")]
  UnknownGroup { name: String, declared: String },
}

/// One output group: every output receives the merge of `input`, in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildGroup {
  pub input: Vec<String>,
  pub output: Vec<String>,
}

impl BuildGroup {
  pub fn new<I, O, S, T>(input: I, output: O) -> Self
  where
    I: IntoIterator<Item = S>,
    O: IntoIterator<Item = T>,
    S: Into<String>,
    T: Into<String>,
  {
    Self {
      input: input.into_iter().map(Into::into).collect(),
      output: output.into_iter().map(Into::into).collect(),
    }
  }

  /// A legacy `output: [inputs]` entry, where the group key is the output.
  pub fn legacy<I, S>(output: &str, input: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::new(input, [output])
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GroupDecl {
  Files(Vec<String>),
  Group(BuildGroup),
}

/// The parsed build-mapping file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSpec {
  groups: Vec<(String, BuildGroup)>,
}

impl BuildSpec {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a group; a group with the same name is replaced in place.
  pub fn insert(&mut self, name: impl Into<String>, group: BuildGroup) {
    let name = name.into();
    match self.groups.iter_mut().find(|(existing, _)| *existing == name) {
      Some((_, slot)) => *slot = group,
      None => self.groups.push((name, group)),
    }
  }

  pub fn with_group(mut self, name: impl Into<String>, group: BuildGroup) -> Self {
    self.insert(name, group);
    self
  }

  /// Load and parse a build-mapping file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let spec = Self::from_yaml_str(&content)?;
    debug!(path = %path.display(), groups = spec.len(), "loaded build mapping");
    Ok(spec)
  }

  pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
    if content.trim().is_empty() {
      return Err(ConfigError::InvalidFormat("build mapping is empty".to_string()));
    }
    let root = crate::yaml::from_str(content)?;
    Self::from_value(root)
  }

  pub fn from_value(root: Value) -> Result<Self, ConfigError> {
    let Value::Mapping(mapping) = root else {
      return Err(ConfigError::InvalidFormat(
        "expected a mapping of group names to groups".to_string(),
      ));
    };

    let mut spec = Self::new();
    for (key, value) in mapping {
      let name = match key {
        Value::String(name) => name,
        other => {
          return Err(ConfigError::InvalidFormat(format!(
            "group names must be strings, found {}",
            serde_yaml::to_string(&other).unwrap_or_default().trim()
          )));
        }
      };

      let group = match serde_yaml::from_value::<GroupDecl>(value) {
        Ok(GroupDecl::Files(input)) => BuildGroup::legacy(&name, input),
        Ok(GroupDecl::Group(group)) if group.output.is_empty() => {
          return Err(ConfigError::InvalidGroup {
            group: name,
            reason: "`output` must list at least one file".to_string(),
          });
        }
        Ok(GroupDecl::Group(group)) => group,
        Err(_) => {
          return Err(ConfigError::InvalidGroup {
            group: name,
            reason: "expected a list of sources or a mapping with `input` and `output` lists".to_string(),
          });
        }
      };

      spec.insert(name, group);
    }

    Ok(spec)
  }

  /// Keep only the named groups, in declaration order.
  pub fn filter_groups<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, ConfigError> {
    for name in names {
      let name = name.as_ref();
      if self.get(name).is_none() {
        return Err(ConfigError::UnknownGroup {
          name: name.to_string(),
          declared: self.names().collect::<Vec<_>>().join(", "),
        });
      }
    }

    let groups = self
      .groups
      .iter()
      .filter(|(name, _)| names.iter().any(|wanted| wanted.as_ref() == name.as_str()))
      .cloned()
      .collect();
    Ok(Self { groups })
  }

  pub fn get(&self, name: &str) -> Option<&BuildGroup> {
    self.groups.iter().find(|(n, _)| n == name).map(|(_, g)| g)
  }

  pub fn groups(&self) -> impl Iterator<Item = (&str, &BuildGroup)> {
    self.groups.iter().map(|(name, group)| (name.as_str(), group))
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.groups.iter().map(|(name, _)| name.as_str())
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }
}
