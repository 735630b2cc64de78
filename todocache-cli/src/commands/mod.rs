//! CLI subcommand implementations.

pub mod demo;
