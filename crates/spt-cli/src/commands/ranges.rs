//! Evaluates travel periods given on the command line.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spt_core::{Calculation, PeriodSet, TaxYear};

use crate::commands::report::write_calculation;
use crate::commands::util::PeriodArg;

/// Validates `periods` as a set, then counts and evaluates them.
///
/// Periods are validated one at a time in the order given.
pub fn run<W: Write>(
    writer: &mut W,
    periods: &[PeriodArg],
    tax_year: TaxYear,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let mut set = PeriodSet::new();
    for PeriodArg(period) in periods {
        set.add(*period)
            .with_context(|| format!("cannot add travel period {period}"))?;
    }
    set.require_non_empty()?;
    tracing::debug!(periods = set.len(), "validated travel periods");

    let calc = Calculation::from_periods(tax_year, set.as_slice(), today);
    write_calculation(writer, &calc, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> TaxYear {
        TaxYear::new(y).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn periods(args: &[&str]) -> Vec<PeriodArg> {
        args.iter().map(|a| a.parse().unwrap()).collect()
    }

    #[test]
    fn ranges_command_counts_full_year() {
        let mut out = Vec::new();
        run(
            &mut out,
            &periods(&["2024-01-01..2024-12-31"]),
            year(2024),
            date("2025-06-01"),
            true,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["source"], "dateRanges");
        assert_eq!(value["currentYearDays"], 366);
        assert_eq!(value["passesTest"], true);
    }

    #[test]
    fn ranges_command_rejects_overlap() {
        let mut out = Vec::new();
        let err = run(
            &mut out,
            &periods(&["2024-01-01..2024-03-01", "2024-02-01..2024-04-01"]),
            year(2024),
            date("2025-06-01"),
            false,
        )
        .unwrap_err();

        assert_eq!(
            err.root_cause().to_string(),
            "This period overlaps with an existing period. Travel periods cannot overlap."
        );
    }

    #[test]
    fn ranges_command_rejects_unbounded_period() {
        let mut out = Vec::new();
        let err = run(&mut out, &periods(&[".."]), year(2024), date("2025-06-01"), false)
            .unwrap_err();

        assert_eq!(
            err.root_cause().to_string(),
            "Cannot have both 'No arrival' and 'No departure'"
        );
    }
}
