//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use regex::Regex;
use spt_core::{TaxYear, TravelPeriod};

use crate::Config;

/// Pre-compiled regex for `ARRIVAL..DEPARTURE` period arguments.
static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]{4}-[0-9]{2}-[0-9]{2})?\s*\.\.\s*([0-9]{4}-[0-9]{2}-[0-9]{2})?\s*$")
        .unwrap()
});

/// A travel period parsed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodArg(pub TravelPeriod);

impl FromStr for PeriodArg {
    type Err = anyhow::Error;

    /// Parses `2024-01-01..2024-06-30`, `..2024-06-30` or `2024-01-01..`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(caps) = PERIOD_RE.captures(s) else {
            anyhow::bail!(
                "Invalid period: {s}. Use ARRIVAL..DEPARTURE (e.g., 2024-01-01..2024-06-30), leaving a side empty for an open end"
            );
        };

        let parse_side = |idx: usize| -> anyhow::Result<Option<NaiveDate>> {
            caps.get(idx)
                .map(|m| {
                    m.as_str()
                        .parse::<NaiveDate>()
                        .with_context(|| format!("invalid date {} in period {s}", m.as_str()))
                })
                .transpose()
        };

        Ok(Self(TravelPeriod {
            arrival: parse_side(1)?,
            departure: parse_side(2)?,
        }))
    }
}

/// The date open-ended periods run until: `--as-of`, else today's local date.
pub fn resolve_today(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

/// Picks the tax year: command-line flag, then config, then last calendar year.
pub fn resolve_tax_year(
    flag: Option<i32>,
    config: &Config,
    today: NaiveDate,
) -> anyhow::Result<TaxYear> {
    let year = match flag.or(config.tax_year) {
        Some(year) => TaxYear::new(year),
        None => TaxYear::default_for(today),
    };
    year.context("invalid tax year")
}

/// Reads a travel log from `file`, or from stdin when `None`.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read travel log from stdin")?;
            Ok(raw)
        }
    }
}
