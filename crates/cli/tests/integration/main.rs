//! Integration tests for the confmerge binary.

mod common;
mod group_tests;
