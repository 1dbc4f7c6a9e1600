//! confmerge-lib: Core engine for confmerge
//!
//! This crate builds output YAML files by deep-merging ordered lists of
//! source documents:
//! - `BuildSpec`: the build-mapping file, output groups and their inputs
//! - `ResolvedGraph`: absolute output paths mapped to absolute input paths
//! - `Builder`: the merge engine, with per-run memoization and cycle detection
//! - `deep_merge`: key-by-key merging of nested mappings

pub mod build;
pub mod config;
pub mod consts;
pub mod graph;
pub mod merge;
pub mod resolve;
pub mod util;
pub mod yaml;

pub use build::{BuildError, BuildSummary, Builder, build_all};
pub use config::{BuildGroup, BuildSpec, ConfigError};
pub use graph::ResolvedGraph;
pub use merge::{deep_merge, merge_all};
