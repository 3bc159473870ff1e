//! # devnetiks-cli
//!
//! Command-line front end over `devnetiks-core`. The binary in `main.rs`
//! parses arguments and prints; the modules here do the work so they can be
//! tested without spawning a process.

pub mod commands;
pub mod config;
