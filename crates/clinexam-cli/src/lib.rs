//! clinexam-cli library root.
//!
//! The binary stands in for the form layer: it reads a snapshot file,
//! applies path-addressed edits and prints engine results as JSON. The
//! modules are public so integration tests can drive them without
//! spawning the binary.

pub mod commands;
pub mod config;
