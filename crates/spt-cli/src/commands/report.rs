//! Rendering of calculation results.
//!
//! Human-readable output follows the layout of a results panel: verdict,
//! weighted breakdown, requirement checklist and, for date-range
//! calculations, the periods that were counted.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use spt_core::{Calculation, ImportWarning, TravelPeriod};

const fn check_mark(met: bool) -> &'static str {
    if met { "✓" } else { "✗" }
}

/// Formats the verdict and weighted breakdown of a calculation.
pub fn format_report(calc: &Calculation) -> String {
    let mut output = String::new();
    let result = &calc.result;
    let year = calc.tax_year.value();

    if result.passes_test {
        writeln!(output, "You meet the Substantial Presence Test").unwrap();
        writeln!(
            output,
            "Based on your input, you are considered a U.S. resident for tax purposes for {year}."
        )
        .unwrap();
    } else {
        writeln!(output, "You do not meet the Substantial Presence Test").unwrap();
        writeln!(
            output,
            "Based on your input, you are not considered a U.S. resident for tax purposes for {year}."
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "Calculation Breakdown").unwrap();
    writeln!(
        output,
        "Current Year ({year}): {} days",
        result.current_year_days
    )
    .unwrap();
    writeln!(
        output,
        "First Prior Year ({}): {} days × 1/3 = {:.2} days",
        year - 1,
        result.first_prior_year_days,
        result.first_prior_year_days_calculated
    )
    .unwrap();
    writeln!(
        output,
        "Second Prior Year ({}): {} days × 1/6 = {:.2} days",
        year - 2,
        result.second_prior_year_days,
        result.second_prior_year_days_calculated
    )
    .unwrap();
    writeln!(output, "Total Days: {:.2} days", result.total_days).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "Requirements to meet the test:").unwrap();
    writeln!(
        output,
        "At least 31 days in the current year: {}",
        check_mark(result.meets_current_year_requirement)
    )
    .unwrap();
    writeln!(
        output,
        "At least 183 total calculated days: {}",
        check_mark(result.meets_total_days_requirement)
    )
    .unwrap();

    if let Some(periods) = calc.periods() {
        writeln!(output).unwrap();
        output.push_str(&format_periods(periods));
    }

    output
}

/// Formats periods as a table, newest first as given.
pub fn format_periods(periods: &[TravelPeriod]) -> String {
    let mut output = String::new();
    writeln!(output, "Travel Periods").unwrap();
    writeln!(output, "{:<10}  {:<10}  Days", "Arrival", "Departure").unwrap();
    for period in periods {
        let arrival = period
            .arrival
            .map_or_else(|| "N/A".to_string(), |d| d.to_string());
        let departure = period
            .departure
            .map_or_else(|| "N/A".to_string(), |d| d.to_string());
        let days = period
            .inclusive_days()
            .map_or_else(|| "N/A".to_string(), |d| d.to_string());
        writeln!(output, "{arrival:<10}  {departure:<10}  {days}").unwrap();
    }
    output
}

/// Formats import warnings as a bulleted list with review advice.
pub fn format_warnings(warnings: &[ImportWarning]) -> String {
    let mut output = String::new();
    writeln!(output, "Warnings:").unwrap();
    for warning in warnings {
        writeln!(output, "- {warning}").unwrap();
    }
    writeln!(
        output,
        "Please review the data and make any necessary corrections. \
         You can still import the data as is, but the results may not be accurate."
    )
    .unwrap();
    output
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("failed to serialize output")?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a calculation as JSON or as the human-readable report.
pub fn write_calculation<W: Write>(writer: &mut W, calc: &Calculation, json: bool) -> Result<()> {
    if json {
        write_json(writer, calc)
    } else {
        write!(writer, "{}", format_report(calc))?;
        Ok(())
    }
}
