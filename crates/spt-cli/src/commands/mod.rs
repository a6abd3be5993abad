//! CLI subcommand implementations.

pub mod import;
pub mod manual;
pub mod parse;
pub mod ranges;
pub mod report;
pub mod util;
