//! Substantial Presence Test CLI library.
//!
//! This crate provides the command-line interface over `spt-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EvalOpts};
pub use config::Config;
