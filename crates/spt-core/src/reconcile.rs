//! Interval reconciliation: travel periods to per-year day counts.
//!
//! # Algorithm Summary
//!
//! 1. Resolve each period's open ends: a missing arrival starts at the
//!    opening of the second-prior year, a missing departure ends at
//!    `min(today, Dec 31 of the tax year)`
//! 2. Clip the resolved range to each of the three year windows
//! 3. Walk the clipped days, counting each calendar day at most once across
//!    all periods
//!
//! Each calendar day belongs to exactly one year window, so the result is
//! the size of the union of all resolved ranges within each window and does
//! not depend on the order of the input.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use crate::period::TravelPeriod;
use crate::types::{DayCounts, TaxYear, YearWindow};

/// Calendar days already counted during one reconciliation.
#[derive(Debug, Default)]
struct DayLedger {
    seen: HashSet<NaiveDate>,
}

impl DayLedger {
    /// Counts the days of `[start, end]` inside `window` not seen before.
    fn count_window(&mut self, start: NaiveDate, end: NaiveDate, window: &YearWindow) -> u32 {
        let Some((from, to)) = window.clip(start, end) else {
            return 0;
        };
        let mut counted = 0;
        for day in from.iter_days().take_while(|day| *day <= to) {
            if self.seen.insert(day) {
                counted += 1;
            }
        }
        counted
    }
}

/// Resolves open ends against the evaluation point.
///
/// Returns `None` for periods with neither end known.
fn effective_range(
    period: &TravelPeriod,
    tax_year: TaxYear,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    if period.is_unbounded() {
        return None;
    }
    let start = period.arrival.unwrap_or(tax_year.second_prior().start);
    let end = period
        .departure
        .unwrap_or_else(|| today.min(tax_year.current().end));
    Some((start, end))
}

/// Counts days present in each window, resolving open departures against
/// today's local date.
pub fn reconcile(periods: &[TravelPeriod], tax_year: TaxYear) -> DayCounts {
    reconcile_as_of(periods, tax_year, Local::now().date_naive())
}

/// Counts days present in each window as of `today`.
///
/// Overlapping coverage, including the turnaround day shared by a departure
/// and the next arrival, is counted once.
pub fn reconcile_as_of(periods: &[TravelPeriod], tax_year: TaxYear, today: NaiveDate) -> DayCounts {
    let [current, first_prior, second_prior] = tax_year.windows();
    let mut ledger = DayLedger::default();
    let mut counts = DayCounts::default();

    for period in periods {
        let Some((start, end)) = effective_range(period, tax_year, today) else {
            tracing::debug!("skipping period with no known dates");
            continue;
        };
        counts.current_year_days += ledger.count_window(start, end, &current);
        counts.first_prior_year_days += ledger.count_window(start, end, &first_prior);
        counts.second_prior_year_days += ledger.count_window(start, end, &second_prior);
    }

    tracing::debug!(
        %tax_year,
        %today,
        periods = periods.len(),
        current = counts.current_year_days,
        first_prior = counts.first_prior_year_days,
        second_prior = counts.second_prior_year_days,
        "reconciled travel periods"
    );
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn closed(a: &str, d: &str) -> TravelPeriod {
        TravelPeriod::closed(date(a), date(d))
    }

    fn year(y: i32) -> TaxYear {
        TaxYear::new(y).unwrap()
    }

    const TODAY: &str = "2026-10-19";

    fn counts_for(periods: &[TravelPeriod], tax_year: i32) -> DayCounts {
        reconcile_as_of(periods, year(tax_year), date(TODAY))
    }

    #[test]
    fn empty_input_counts_nothing() {
        assert_eq!(counts_for(&[], 2024), DayCounts::default());
    }

    #[test]
    fn full_leap_year() {
        let counts = counts_for(&[closed("2024-01-01", "2024-12-31")], 2024);
        assert_eq!(counts, DayCounts::new(366, 0, 0));
    }

    #[test]
    fn shared_boundary_day_counted_once() {
        let periods = [
            closed("2024-01-01", "2024-06-30"),
            closed("2024-06-30", "2024-12-31"),
        ];
        assert_eq!(counts_for(&periods, 2024).current_year_days, 366);
    }

    #[test]
    fn adjacent_periods_sum() {
        let periods = [
            closed("2024-01-01", "2024-06-30"),
            closed("2024-07-01", "2024-12-31"),
        ];
        assert_eq!(counts_for(&periods, 2024).current_year_days, 366);
    }

    #[test]
    fn period_clipped_to_each_window() {
        let counts = counts_for(&[closed("2023-11-01", "2024-02-01")], 2024);
        assert_eq!(counts, DayCounts::new(32, 61, 0));
    }

    #[test]
    fn open_start_reaches_back_to_second_prior_year() {
        let periods = [TravelPeriod::open_start(date("2024-03-01"))];
        let counts = counts_for(&periods, 2024);
        // Jan (31) + Feb (29) + Mar 1
        assert_eq!(counts, DayCounts::new(61, 365, 365));
    }

    #[test]
    fn open_end_stops_at_today() {
        let periods = [TravelPeriod::open_end(date("2024-10-01"))];
        let counts = reconcile_as_of(&periods, year(2024), date("2024-10-10"));
        assert_eq!(counts, DayCounts::new(10, 0, 0));
    }

    #[test]
    fn open_end_stops_at_end_of_tax_year() {
        let periods = [TravelPeriod::open_end(date("2024-10-01"))];
        let counts = reconcile_as_of(&periods, year(2024), date("2025-03-01"));
        assert_eq!(counts, DayCounts::new(92, 0, 0));
    }

    #[test]
    fn open_end_arriving_after_today_counts_nothing() {
        let periods = [TravelPeriod::open_end(date("2024-10-01"))];
        let counts = reconcile_as_of(&periods, year(2024), date("2024-09-01"));
        assert_eq!(counts, DayCounts::default());
    }

    #[test]
    fn overlapping_periods_not_double_counted() {
        let periods = [
            closed("2024-01-01", "2024-03-31"),
            closed("2024-03-01", "2024-04-30"),
        ];
        // Jan 1 through Apr 30 of a leap year
        assert_eq!(counts_for(&periods, 2024).current_year_days, 121);
    }

    #[test]
    fn result_is_order_independent_and_idempotent() {
        let mut periods = vec![
            closed("2022-03-01", "2022-09-30"),
            closed("2023-05-10", "2024-01-15"),
            closed("2024-01-10", "2024-02-20"),
            TravelPeriod::open_end(date("2024-11-01")),
        ];
        let forward = counts_for(&periods, 2024);
        assert_eq!(counts_for(&periods, 2024), forward);

        periods.reverse();
        assert_eq!(counts_for(&periods, 2024), forward);
    }

    #[test]
    fn periods_outside_all_windows_ignored() {
        let periods = [
            closed("2018-01-01", "2020-12-31"),
            closed("2025-01-01", "2025-06-30"),
            TravelPeriod {
                arrival: None,
                departure: None,
            },
        ];
        assert_eq!(counts_for(&periods, 2024), DayCounts::default());
    }

    #[test]
    fn counts_bounded_by_window_length() {
        let periods = [closed("2015-01-01", "2030-12-31")];
        let counts = counts_for(&periods, 2021);
        assert_eq!(counts, DayCounts::new(365, 366, 365));
        assert!(counts.validate_for(year(2021)).is_ok());
    }

    #[test]
    fn local_date_entry_point_matches_as_of() {
        let periods = [
            closed("2022-03-01", "2022-05-31"),
            closed("2023-11-01", "2024-02-01"),
            closed("2024-06-30", "2024-07-04"),
        ];
        let counts = reconcile(&periods, year(2024));

        assert_eq!(
            counts,
            reconcile_as_of(&periods, year(2024), Local::now().date_naive())
        );
        assert_eq!(counts, DayCounts::new(37, 61, 92));
    }
}
