//! Core domain logic for the Substantial Presence Test.
//!
//! This crate contains the fundamental types and logic for:
//! - Reconciliation: counting distinct days present per year from travel periods
//! - Record import: rebuilding travel periods from an arrival/departure log
//! - Evaluation: applying the weighted-day formula to three day counts

mod calculation;
mod evaluate;
pub mod period;
mod reconcile;
pub mod records;
pub mod types;

pub use calculation::{Calculation, CalculationSource};
pub use evaluate::{SptResult, SptRules, evaluate, evaluate_with};
pub use period::{PeriodError, PeriodSet, TravelPeriod};
pub use reconcile::{reconcile, reconcile_as_of};
pub use records::{ImportError, ImportOutcome, ImportWarning, ParsedRecords, parse_travel_records};
pub use types::{DayCounts, TaxYear, ValidationError, YearWindow};
