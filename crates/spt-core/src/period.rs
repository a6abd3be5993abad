//! Travel periods and the validated set of periods a calculation runs over.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical presence from arrival through departure, both days inclusive.
///
/// `arrival = None` means present since before any relevant year;
/// `departure = None` means still present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TravelPeriod {
    #[serde(rename = "arrivalDate")]
    pub arrival: Option<NaiveDate>,
    #[serde(rename = "departureDate")]
    pub departure: Option<NaiveDate>,
}

/// One end of a period on a line extended with both infinities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Edge {
    Before,
    On(NaiveDate),
    After,
}

impl TravelPeriod {
    pub const fn closed(arrival: NaiveDate, departure: NaiveDate) -> Self {
        Self {
            arrival: Some(arrival),
            departure: Some(departure),
        }
    }

    /// Present since before the records began, leaving on `departure`.
    pub const fn open_start(departure: NaiveDate) -> Self {
        Self {
            arrival: None,
            departure: Some(departure),
        }
    }

    /// Arrived on `arrival` and not yet departed.
    pub const fn open_end(arrival: NaiveDate) -> Self {
        Self {
            arrival: Some(arrival),
            departure: None,
        }
    }

    /// True when neither end is known. Such periods carry no information.
    pub const fn is_unbounded(&self) -> bool {
        self.arrival.is_none() && self.departure.is_none()
    }

    /// Date used to order periods for display: arrival, else departure.
    pub fn sort_key(&self) -> Option<NaiveDate> {
        self.arrival.or(self.departure)
    }

    /// Inclusive length in days, when both ends are known.
    pub fn inclusive_days(&self) -> Option<i64> {
        match (self.arrival, self.departure) {
            (Some(arrival), Some(departure)) => Some((departure - arrival).num_days() + 1),
            _ => None,
        }
    }

    fn edges(&self) -> (Edge, Edge) {
        (
            self.arrival.map_or(Edge::Before, Edge::On),
            self.departure.map_or(Edge::After, Edge::On),
        )
    }

    /// Returns true if the two periods share more than a turnaround day.
    ///
    /// A departure on the same day as the other period's arrival is not an
    /// overlap. Open ends extend to infinity.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_unbounded() || other.is_unbounded() {
            return false;
        }
        let (a_start, a_end) = self.edges();
        let (b_start, b_end) = other.edges();
        if a_end == b_start || b_end == a_start {
            return false;
        }
        a_start.max(b_start) < a_end.min(b_end)
    }
}

impl fmt::Display for TravelPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.arrival, self.departure) {
            (Some(arrival), Some(departure)) => write!(f, "{arrival} to {departure}"),
            (Some(arrival), None) => write!(f, "{arrival} to present (no departure)"),
            (None, Some(departure)) => {
                write!(f, "unknown arrival to {departure} (no arrival)")
            }
            (None, None) => write!(f, "invalid range"),
        }
    }
}

/// Reasons a period cannot join a [`PeriodSet`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Arrival date must be before departure date")]
    ArrivalAfterDeparture,

    #[error("Cannot have both 'No arrival' and 'No departure'")]
    BothEndsOpen,

    #[error("'No arrival' can only be used for the earliest period")]
    OpenArrivalNotEarliest,

    #[error("'No departure' can only be used for the latest period")]
    OpenDepartureNotLatest,

    #[error("This period overlaps with an existing period. Travel periods cannot overlap.")]
    Overlap { existing: TravelPeriod },

    #[error("At least one travel period is required")]
    Empty,
}

/// Travel periods that have passed validation, newest first.
///
/// Every period in the set has at least one known end, only the earliest
/// may lack an arrival, only the latest may lack a departure, and no two
/// periods overlap beyond a shared turnaround day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PeriodSet {
    periods: Vec<TravelPeriod>,
}

impl PeriodSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `period` against the set and inserts it.
    pub fn add(&mut self, period: TravelPeriod) -> Result<(), PeriodError> {
        if let (Some(arrival), Some(departure)) = (period.arrival, period.departure) {
            if arrival > departure {
                return Err(PeriodError::ArrivalAfterDeparture);
            }
        }

        let (arrival, departure) = match (period.arrival, period.departure) {
            (None, None) => return Err(PeriodError::BothEndsOpen),
            pair => pair,
        };

        if let (None, Some(new_departure)) = (arrival, departure) {
            let has_earlier = self
                .periods
                .iter()
                .any(|p| p.departure.is_some_and(|d| d < new_departure));
            if has_earlier {
                return Err(PeriodError::OpenArrivalNotEarliest);
            }
        }

        if let (Some(new_arrival), None) = (arrival, departure) {
            let has_later = self
                .periods
                .iter()
                .any(|p| p.arrival.is_some_and(|a| a > new_arrival));
            if has_later {
                return Err(PeriodError::OpenDepartureNotLatest);
            }
        }

        if let Some(existing) = self.periods.iter().find(|p| p.overlaps(&period)) {
            return Err(PeriodError::Overlap {
                existing: *existing,
            });
        }

        self.periods.push(period);
        self.periods.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        tracing::debug!(%period, total = self.periods.len(), "added travel period");
        Ok(())
    }

    /// Errors when the set holds no periods.
    pub fn require_non_empty(&self) -> Result<(), PeriodError> {
        if self.is_empty() {
            Err(PeriodError::Empty)
        } else {
            Ok(())
        }
    }

    pub fn as_slice(&self) -> &[TravelPeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
