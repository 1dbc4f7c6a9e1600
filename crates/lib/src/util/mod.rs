//! Shared utilities.
//!
//! Test helpers for building fixture trees of YAML sources.

#[cfg(test)]
pub mod testutil;
