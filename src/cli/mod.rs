// file: src/cli/mod.rs
// version: 1.0.0
// guid: 1ab1ce27-32a8-4574-8c3e-0f2b4453762d

//! Command line interface for the demo binary

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
