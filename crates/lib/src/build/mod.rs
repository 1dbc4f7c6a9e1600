//! The merge engine.
//!
//! Builds every output of a [`ResolvedGraph`] by merging its inputs in
//! declared order. An input that is itself a declared output is built first,
//! recursively, so outputs can chain.
//!
//! # Characteristics
//!
//! - **Memoized**: each output is computed at most once per [`Builder`]
//! - **Cycle-safe**: outputs currently being built are tracked, and re-entering
//!   one fails with [`BuildError::CyclicDependency`] instead of recursing forever
//! - **Fail-fast**: the first error aborts the run; nothing is retried

mod types;

pub use types::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info};

use crate::graph::ResolvedGraph;
use crate::merge::{deep_merge, empty_document};
use crate::yaml;

/// One build run over a resolved graph.
///
/// The cache lives as long as the builder, so two builders never share
/// results.
pub struct Builder<'a> {
  graph: &'a ResolvedGraph,
  cache: HashMap<PathBuf, Value>,
  in_progress: Vec<PathBuf>,
  cache_hits: usize,
}

impl<'a> Builder<'a> {
  pub fn new(graph: &'a ResolvedGraph) -> Self {
    Self {
      graph,
      cache: HashMap::new(),
      in_progress: Vec::new(),
      cache_hits: 0,
    }
  }

  /// Build the merged document of a declared output.
  ///
  /// # Errors
  ///
  /// - `UnknownOutput` if `output` is not a key of the graph
  /// - `SourceNotFound` if an input is neither on disk nor a declared output
  /// - `CyclicDependency` if `output` depends on itself
  /// - `Parse` / `Io` if a source cannot be loaded
  pub fn build(&mut self, output: &Path) -> Result<Value, BuildError> {
    if let Some(doc) = self.cache.get(output) {
      debug!(output = %output.display(), "using cached");
      self.cache_hits += 1;
      return Ok(doc.clone());
    }

    let graph = self.graph;
    let inputs = graph.inputs(output).ok_or_else(|| BuildError::UnknownOutput {
      path: output.to_path_buf(),
    })?;

    if let Some(start) = self.in_progress.iter().position(|p| p == output) {
      let chain = self.in_progress[start..]
        .iter()
        .map(|p| p.as_path())
        .chain(std::iter::once(output))
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ");
      return Err(BuildError::CyclicDependency { chain });
    }

    info!(output = %output.display(), sources = inputs.len(), "building");

    self.in_progress.push(output.to_path_buf());
    let merged = self.merge_inputs(inputs);
    self.in_progress.pop();

    let doc = merged?;
    self.cache.insert(output.to_path_buf(), doc.clone());
    Ok(doc)
  }

  fn merge_inputs(&mut self, inputs: &[PathBuf]) -> Result<Value, BuildError> {
    let mut result = empty_document();

    for input in inputs {
      let doc = if self.graph.contains(input) {
        debug!(input = %input.display(), "input is a declared output");
        self.build(input)?
      } else if input.exists() {
        yaml::load(input)?
      } else {
        return Err(BuildError::SourceNotFound { path: input.clone() });
      };

      result = deep_merge(result, doc);
    }

    Ok(result)
  }

  /// Build every output in graph order and write each one to disk.
  pub fn build_all(&mut self) -> Result<BuildSummary, BuildError> {
    let graph = self.graph;
    let mut summary = BuildSummary::default();

    for output in graph.outputs() {
      let doc = self.build(output)?;
      yaml::dump(&doc, output)?;
      info!(output = %output.display(), "wrote output");
      summary.written.push(output.to_path_buf());
    }

    summary.cache_hits = self.cache_hits;
    Ok(summary)
  }
}

/// Build and write every output of `graph` with a fresh cache.
pub fn build_all(graph: &ResolvedGraph) -> Result<BuildSummary, BuildError> {
  Builder::new(graph).build_all()
}
