//! Evaluates day counts entered directly.

use std::io::Write;

use anyhow::Result;
use spt_core::{Calculation, DayCounts, TaxYear};

use crate::commands::report::write_calculation;

pub fn run<W: Write>(writer: &mut W, tax_year: TaxYear, counts: DayCounts, json: bool) -> Result<()> {
    let calc = Calculation::manual(tax_year, counts)?;
    tracing::debug!(%tax_year, passes = calc.result.passes_test, "manual calculation");
    write_calculation(writer, &calc, json)
}
