//! Travel-record import.
//!
//! Reconstructs travel periods from a tab-separated arrival/departure log
//! (one record per line: row, `YYYY-MM-DD` date, `Arrival`|`Departure`,
//! optional location). Malformed lines are dropped silently; inconsistencies
//! in the reconstructed history are reported as [`ImportWarning`]s and never
//! alter the periods.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::period::TravelPeriod;

/// Strict `YYYY-MM-DD` shape, ASCII digits only.
static RECORD_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Direction of a border crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Arrival,
    Departure,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Arrival => "Arrival",
            Self::Departure => "Departure",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    /// Case-sensitive: `arrival` or `ARRIVAL` are not records.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Arrival" => Ok(Self::Arrival),
            "Departure" => Ok(Self::Departure),
            _ => Err(UnknownRecordKind(s.to_string())),
        }
    }
}

/// Error type for unknown record kind strings.
#[derive(Debug, Clone)]
pub struct UnknownRecordKind(String);

impl fmt::Display for UnknownRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown record type: {}", self.0)
    }
}

impl std::error::Error for UnknownRecordKind {}

/// One validated line of the travel log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelRecord {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub location: Option<String>,
}

/// Non-fatal inconsistencies found while reconstructing periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// Two arrivals with no departure between them.
    ConsecutiveArrivals { first: NaiveDate, second: NaiveDate },
    /// A departure with no pending arrival, other than the very first record.
    UnmatchedDeparture { date: NaiveDate },
    /// Two reconstructed periods overlap.
    OverlappingPeriods {
        first: TravelPeriod,
        second: TravelPeriod,
    },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConsecutiveArrivals { first, second } => write!(
                f,
                "Found two consecutive arrivals without a departure in between: \
                 {first} and {second}. The first arrival has been treated as if \
                 you departed on the same day as the second arrival."
            ),
            Self::UnmatchedDeparture { date } => write!(
                f,
                "Found a departure on {date} without a matching arrival. \
                 This may indicate missing data."
            ),
            Self::OverlappingPeriods { first, second } => write!(
                f,
                "Found overlapping travel periods: {first} and {second}. \
                 This may result in incorrect calculations."
            ),
        }
    }
}

impl Serialize for ImportWarning {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Reconstructed periods (newest first) and the warnings raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRecords {
    pub periods: Vec<TravelPeriod>,
    pub warnings: Vec<ImportWarning>,
}

/// Pairing state while walking records oldest to newest.
#[derive(Debug, Clone, Copy)]
enum Pairing {
    /// No record seen yet; a departure here means present before records began.
    BeforeFirstRecord,
    NoPendingArrival,
    PendingArrival(NaiveDate),
}

/// Looks like a column header rather than a record.
fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.starts_with("Row") || lower.contains("date") || lower.contains("type")
}

/// Parses one line, returning `None` for anything that is not a valid record.
fn parse_line(line: &str) -> Option<TravelRecord> {
    if is_header(line) {
        return None;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return None;
    }

    let date = fields[1].trim();
    if !RECORD_DATE_RE.is_match(date) {
        return None;
    }
    let date = date.parse().ok()?;
    let kind = fields[2].trim().parse().ok()?;
    let location = fields
        .get(3)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from);

    Some(TravelRecord {
        date,
        kind,
        location,
    })
}

/// Parses every line of `raw`, oldest record first.
///
/// The sort is stable: records on the same date keep their file order.
pub fn parse_records(raw: &str) -> Vec<TravelRecord> {
    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for line in raw.trim().lines() {
        match parse_line(line) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    records.sort_by_key(|record| record.date);

    tracing::debug!(records = records.len(), skipped, "parsed travel records");
    records
}

/// Pairs chronologically sorted records into periods.
fn pair_records(records: &[TravelRecord]) -> (Vec<TravelPeriod>, Vec<ImportWarning>) {
    let mut periods = Vec::new();
    let mut warnings = Vec::new();
    let mut state = Pairing::BeforeFirstRecord;

    for record in records {
        state = match (state, record.kind) {
            (Pairing::BeforeFirstRecord | Pairing::NoPendingArrival, RecordKind::Arrival) => {
                Pairing::PendingArrival(record.date)
            }
            (Pairing::PendingArrival(pending), RecordKind::Arrival) => {
                // Assume an unrecorded departure on the day of the second arrival.
                warnings.push(ImportWarning::ConsecutiveArrivals {
                    first: pending,
                    second: record.date,
                });
                periods.push(TravelPeriod::closed(pending, record.date));
                Pairing::PendingArrival(record.date)
            }
            (Pairing::PendingArrival(arrival), RecordKind::Departure) => {
                periods.push(TravelPeriod::closed(arrival, record.date));
                Pairing::NoPendingArrival
            }
            (Pairing::BeforeFirstRecord, RecordKind::Departure) => {
                periods.push(TravelPeriod::open_start(record.date));
                Pairing::NoPendingArrival
            }
            (Pairing::NoPendingArrival, RecordKind::Departure) => {
                warnings.push(ImportWarning::UnmatchedDeparture { date: record.date });
                Pairing::NoPendingArrival
            }
        };
    }

    if let Pairing::PendingArrival(arrival) = state {
        periods.push(TravelPeriod::open_end(arrival));
    }

    (periods, warnings)
}

/// Checks every pair of periods for overlap.
///
/// Turnaround days (a departure on another period's arrival date) are not
/// overlaps; open ends extend to infinity.
pub fn find_overlaps(periods: &[TravelPeriod]) -> Vec<ImportWarning> {
    let mut warnings = Vec::new();
    for (i, first) in periods.iter().enumerate() {
        for second in &periods[i + 1..] {
            if first.overlaps(second) {
                warnings.push(ImportWarning::OverlappingPeriods {
                    first: *first,
                    second: *second,
                });
            }
        }
    }
    warnings
}

/// Reconstructs travel periods from a raw travel log.
///
/// Never fails: input with no valid records yields no periods. Periods are
/// returned newest first.
pub fn parse_travel_records(raw: &str) -> ParsedRecords {
    let records = parse_records(raw);
    let (mut periods, mut warnings) = pair_records(&records);
    warnings.extend(find_overlaps(&periods));

    periods.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));

    for warning in &warnings {
        tracing::debug!(%warning, "travel record inconsistency");
    }
    ParsedRecords { periods, warnings }
}

/// How a caller should treat a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Nothing usable was found.
    Empty,
    /// Periods reconstructed without inconsistencies.
    Clean(Vec<TravelPeriod>),
    /// Periods may misrepresent the history; the user must confirm them.
    NeedsConfirmation {
        periods: Vec<TravelPeriod>,
        warnings: Vec<ImportWarning>,
    },
}

/// Reasons an import is not accepted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("No valid travel periods found in the data. Please check the format and try again.")]
    NoPeriods,

    #[error("travel records have {} warning(s); review them and confirm the import", .warnings.len())]
    Unconfirmed { warnings: Vec<ImportWarning> },
}

impl From<ParsedRecords> for ImportOutcome {
    fn from(parsed: ParsedRecords) -> Self {
        if parsed.periods.is_empty() {
            Self::Empty
        } else if parsed.warnings.is_empty() {
            Self::Clean(parsed.periods)
        } else {
            Self::NeedsConfirmation {
                periods: parsed.periods,
                warnings: parsed.warnings,
            }
        }
    }
}

impl ImportOutcome {
    /// Accepts the periods, requiring `confirmed` when there are warnings.
    pub fn accept(self, confirmed: bool) -> Result<Vec<TravelPeriod>, ImportError> {
        match self {
            Self::Empty => Err(ImportError::NoPeriods),
            Self::Clean(periods) => Ok(periods),
            Self::NeedsConfirmation { periods, .. } if confirmed => Ok(periods),
            Self::NeedsConfirmation { warnings, .. } => Err(ImportError::Unconfirmed { warnings }),
        }
    }
}
