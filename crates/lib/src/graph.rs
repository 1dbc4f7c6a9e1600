//! The resolved build graph.
//!
//! Maps absolute output paths to ordered lists of absolute input paths.
//! An input that is itself an output key is an edge to that output; the
//! merge engine follows those edges when building.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::build::BuildError;
use crate::config::BuildSpec;
use crate::resolve::resolve;

/// Output paths to their input paths, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedGraph {
  entries: Vec<(PathBuf, Vec<PathBuf>)>,
  index: HashMap<PathBuf, usize>,
}

impl ResolvedGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Resolve every group of `spec` against `base_dir`.
  ///
  /// Each output identifier must resolve to exactly one path, and no two
  /// output identifiers may resolve to the same path. Input identifiers
  /// expand to zero or more paths; a path listed twice for one group is kept
  /// at its last position only, so later sources still win.
  pub fn resolve(spec: &BuildSpec, base_dir: &Path) -> Result<Self, BuildError> {
    let mut graph = Self::new();

    for (name, group) in spec.groups() {
      let inputs = resolve_inputs(&group.input, base_dir)?;
      debug!(group = name, inputs = inputs.len(), "resolved inputs");

      for identifier in &group.output {
        let output = resolve_output(identifier, base_dir)?;
        if graph.contains(&output) {
          return Err(BuildError::InvalidOutputPath {
            identifier: identifier.clone(),
            reason: format!("{} is already declared as an output", output.display()),
          });
        }
        graph.insert(output, inputs.clone());
      }
    }

    Ok(graph)
  }

  /// Add an output, replacing the inputs of an existing one in place.
  pub fn insert(&mut self, output: PathBuf, inputs: Vec<PathBuf>) {
    match self.index.get(&output) {
      Some(&i) => self.entries[i].1 = inputs,
      None => {
        self.index.insert(output.clone(), self.entries.len());
        self.entries.push((output, inputs));
      }
    }
  }

  pub fn contains(&self, output: &Path) -> bool {
    self.index.contains_key(output)
  }

  pub fn inputs(&self, output: &Path) -> Option<&[PathBuf]> {
    self.index.get(output).map(|&i| self.entries[i].1.as_slice())
  }

  pub fn outputs(&self) -> impl Iterator<Item = &Path> {
    self.entries.iter().map(|(output, _)| output.as_path())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Path, &[PathBuf])> {
    self
      .entries
      .iter()
      .map(|(output, inputs)| (output.as_path(), inputs.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn resolve_output(identifier: &str, base_dir: &Path) -> Result<PathBuf, BuildError> {
  let mut paths = resolve(identifier, base_dir)?;
  match paths.len() {
    1 => Ok(paths.remove(0)),
    0 => Err(BuildError::InvalidOutputPath {
      identifier: identifier.to_string(),
      reason: "pattern matched no files".to_string(),
    }),
    n => Err(BuildError::InvalidOutputPath {
      identifier: identifier.to_string(),
      reason: format!("pattern matched {} files", n),
    }),
  }
}

fn resolve_inputs(identifiers: &[String], base_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let mut inputs = Vec::new();
  for identifier in identifiers {
    inputs.extend(resolve(identifier, base_dir)?);
  }

  // A repeated path is merged at its last position only.
  let mut seen = HashSet::new();
  let mut deduped: Vec<PathBuf> = inputs.into_iter().rev().filter(|path| seen.insert(path.clone())).collect();
  deduped.reverse();
  Ok(deduped)
}
