//! Shows the travel periods reconstructed from a travel log.

use std::io::Write;

use anyhow::Result;
use spt_core::{ImportError, parse_travel_records};

use crate::commands::report::{format_periods, format_warnings, write_json};

pub fn run<W: Write>(writer: &mut W, raw: &str, json: bool) -> Result<()> {
    let parsed = parse_travel_records(raw);
    if parsed.periods.is_empty() {
        return Err(ImportError::NoPeriods.into());
    }

    if json {
        return write_json(writer, &parsed);
    }

    write!(writer, "{}", format_periods(&parsed.periods))?;
    if parsed.warnings.is_empty() {
        writeln!(writer, "No warnings.")?;
    } else {
        writeln!(writer)?;
        write!(writer, "{}", format_warnings(&parsed.warnings))?;
    }
    Ok(())
}
