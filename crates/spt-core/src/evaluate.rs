//! Substantial Presence Test evaluation.

use serde::Serialize;

use crate::types::DayCounts;

/// Thresholds and weights of the test.
#[derive(Debug, Clone, PartialEq)]
pub struct SptRules {
    /// Minimum days present in the current year.
    /// Default: 31.
    pub min_current_year_days: u32,

    /// Minimum weighted total across the three years.
    /// Default: 183.
    pub min_weighted_days: f64,

    /// First-prior-year days count for `1 / first_prior_divisor` each.
    /// Default: 3.
    pub first_prior_divisor: f64,

    /// Second-prior-year days count for `1 / second_prior_divisor` each.
    /// Default: 6.
    pub second_prior_divisor: f64,
}

impl Default for SptRules {
    fn default() -> Self {
        Self {
            min_current_year_days: 31,
            min_weighted_days: 183.0,
            first_prior_divisor: 3.0,
            second_prior_divisor: 6.0,
        }
    }
}

/// Weighted breakdown and verdict for one set of day counts.
///
/// Weighted values are kept unrounded; rounding is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SptResult {
    pub current_year_days: u32,
    pub first_prior_year_days: u32,
    pub second_prior_year_days: u32,
    pub first_prior_year_days_calculated: f64,
    pub second_prior_year_days_calculated: f64,
    pub total_days: f64,
    pub meets_current_year_requirement: bool,
    pub meets_total_days_requirement: bool,
    pub passes_test: bool,
}

/// Evaluates `counts` under the statutory rules.
pub fn evaluate(counts: DayCounts) -> SptResult {
    evaluate_with(counts, &SptRules::default())
}

/// Evaluates `counts` under `rules`.
pub fn evaluate_with(counts: DayCounts, rules: &SptRules) -> SptResult {
    let first_prior_year_days_calculated =
        f64::from(counts.first_prior_year_days) / rules.first_prior_divisor;
    let second_prior_year_days_calculated =
        f64::from(counts.second_prior_year_days) / rules.second_prior_divisor;
    let total_days = f64::from(counts.current_year_days)
        + first_prior_year_days_calculated
        + second_prior_year_days_calculated;

    let meets_current_year_requirement = counts.current_year_days >= rules.min_current_year_days;
    let meets_total_days_requirement = total_days >= rules.min_weighted_days;

    SptResult {
        current_year_days: counts.current_year_days,
        first_prior_year_days: counts.first_prior_year_days,
        second_prior_year_days: counts.second_prior_year_days,
        first_prior_year_days_calculated,
        second_prior_year_days_calculated,
        total_days,
        meets_current_year_requirement,
        meets_total_days_requirement,
        passes_test: meets_current_year_requirement && meets_total_days_requirement,
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "exact equality intended for values representable in f64"
)]
mod tests {
    use super::*;

    #[test]
    fn thirty_one_days_meets_only_current_year_requirement() {
        let result = evaluate(DayCounts::new(31, 0, 0));
        assert_eq!(result.total_days, 31.0);
        assert!(result.meets_current_year_requirement);
        assert!(!result.meets_total_days_requirement);
        assert!(!result.passes_test);
    }

    #[test]
    fn one_hundred_eighty_three_current_days_pass() {
        let result = evaluate(DayCounts::new(183, 0, 0));
        assert!(result.passes_test);
    }

    #[test]
    fn thirty_current_days_fail_regardless_of_total() {
        let result = evaluate(DayCounts::new(30, 365, 365));
        assert!(result.meets_total_days_requirement);
        assert!(!result.meets_current_year_requirement);
        assert!(!result.passes_test);
    }

    #[test]
    fn weighted_total_at_threshold_passes() {
        // 120/3 + 120/6 = 60
        assert!(!evaluate(DayCounts::new(122, 120, 120)).passes_test);

        let result = evaluate(DayCounts::new(123, 120, 120));
        assert_eq!(result.first_prior_year_days_calculated, 40.0);
        assert_eq!(result.second_prior_year_days_calculated, 20.0);
        assert_eq!(result.total_days, 183.0);
        assert!(result.passes_test);
    }

    #[test]
    fn fractional_total_is_not_rounded_before_comparison() {
        // 182 + 1/3 + 1/6 = 182.5
        let result = evaluate(DayCounts::new(182, 1, 1));
        assert!((result.total_days - 182.5).abs() < 1e-9);
        assert!(!result.meets_total_days_requirement);

        let result = evaluate(DayCounts::new(182, 2, 0));
        assert!(result.total_days < 183.0);
        assert!(!result.passes_test);
    }

    #[test]
    fn manual_scenario_passes() {
        let result = evaluate(DayCounts::new(244, 0, 0));
        assert_eq!(result.total_days, 244.0);
        assert!(result.passes_test);
    }

    #[test]
    fn custom_rules_apply() {
        let rules = SptRules {
            min_current_year_days: 10,
            min_weighted_days: 20.0,
            ..SptRules::default()
        };
        assert!(evaluate_with(DayCounts::new(20, 0, 0), &rules).passes_test);
    }
}
