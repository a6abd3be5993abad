//! Imports a tab-separated travel log and evaluates it.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Serialize;
use spt_core::{Calculation, ImportError, ImportOutcome, ImportWarning, TaxYear, parse_travel_records};

use crate::commands::report::{format_report, format_warnings, write_json};

/// JSON shape of an accepted import.
#[derive(Debug, Serialize)]
struct ImportReport<'a> {
    #[serde(flatten)]
    calculation: &'a Calculation,
    warnings: &'a [ImportWarning],
}

/// Parses `raw`, then evaluates the reconstructed periods.
///
/// Logs with inconsistencies are refused unless `accept_warnings` is set.
pub fn run<W: Write>(
    writer: &mut W,
    raw: &str,
    tax_year: TaxYear,
    today: NaiveDate,
    accept_warnings: bool,
    json: bool,
) -> Result<()> {
    let parsed = parse_travel_records(raw);
    let warnings = parsed.warnings.clone();

    let periods = match ImportOutcome::from(parsed).accept(accept_warnings) {
        Ok(periods) => periods,
        Err(err @ ImportError::Unconfirmed { .. }) => bail!(
            "{err}\n{}Re-run with --accept-warnings to import anyway.",
            format_warnings(&warnings)
        ),
        Err(err) => return Err(err.into()),
    };
    tracing::debug!(periods = periods.len(), warnings = warnings.len(), "imported travel log");

    let calc = Calculation::from_periods(tax_year, &periods, today);
    if json {
        write_json(
            writer,
            &ImportReport {
                calculation: &calc,
                warnings: &warnings,
            },
        )
    } else {
        write!(writer, "{}", format_report(&calc))?;
        if !warnings.is_empty() {
            writeln!(writer)?;
            write!(writer, "{}", format_warnings(&warnings))?;
        }
        Ok(())
    }
}
