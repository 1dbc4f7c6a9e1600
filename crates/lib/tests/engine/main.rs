//! End-to-end tests of the engine through its public API: a build mapping
//! is parsed, resolved against a temp dir and built.

mod common;
