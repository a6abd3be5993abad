//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::commands::util::PeriodArg;

/// Substantial Presence Test calculator.
///
/// Works out whether days spent in the United States over the tax year and
/// the two years before it make you a U.S. resident for tax purposes.
#[derive(Debug, Parser)]
#[command(name = "spt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate day counts entered directly.
    Manual {
        /// Days present in the tax year.
        #[arg(long, default_value_t = 0)]
        current: u32,

        /// Days present in the year before the tax year.
        #[arg(long, default_value_t = 0)]
        first_prior: u32,

        /// Days present two years before the tax year.
        #[arg(long, default_value_t = 0)]
        second_prior: u32,

        #[command(flatten)]
        opts: EvalOpts,
    },

    /// Evaluate travel periods given as ARRIVAL..DEPARTURE.
    ///
    /// Leave a side empty for an open end: `..2024-03-01` was already
    /// present before the records, `2024-07-01..` is still present.
    Ranges {
        /// A travel period (repeatable).
        #[arg(long = "period", short = 'p', required = true)]
        periods: Vec<PeriodArg>,

        #[command(flatten)]
        opts: EvalOpts,
    },

    /// Import a tab-separated travel log and evaluate it.
    Import {
        /// Travel log file (reads stdin when omitted).
        file: Option<PathBuf>,

        /// Import even when the log has inconsistencies.
        #[arg(long)]
        accept_warnings: bool,

        #[command(flatten)]
        opts: EvalOpts,
    },

    /// Show the travel periods reconstructed from a travel log.
    Parse {
        /// Travel log file (reads stdin when omitted).
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by the evaluating subcommands.
#[derive(Debug, Clone, Args)]
pub struct EvalOpts {
    /// Tax year to evaluate (defaults to last calendar year).
    #[arg(long, short = 'y')]
    pub tax_year: Option<i32>,

    /// Date that open-ended periods run until (defaults to today).
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
