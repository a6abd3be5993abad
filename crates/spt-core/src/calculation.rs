//! A complete calculation: tax year, verdict and where the counts came from.

use chrono::NaiveDate;
use serde::Serialize;

use crate::evaluate::{SptResult, evaluate};
use crate::period::TravelPeriod;
use crate::reconcile::reconcile_as_of;
use crate::types::{DayCounts, TaxYear, ValidationError};

/// Where the day counts of a calculation came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum CalculationSource {
    /// Counts entered directly.
    Manual,
    /// Counts reconciled from travel periods, kept for display.
    DateRanges { periods: Vec<TravelPeriod> },
}

/// The result handed to presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub tax_year: TaxYear,
    #[serde(flatten)]
    pub result: SptResult,
    #[serde(flatten)]
    pub source: CalculationSource,
}

impl Calculation {
    /// Evaluates manually entered counts after checking their bounds.
    pub fn manual(tax_year: TaxYear, counts: DayCounts) -> Result<Self, ValidationError> {
        counts.validate_for(tax_year)?;
        Ok(Self {
            tax_year,
            result: evaluate(counts),
            source: CalculationSource::Manual,
        })
    }

    /// Reconciles `periods` as of `today` and evaluates the counts.
    pub fn from_periods(tax_year: TaxYear, periods: &[TravelPeriod], today: NaiveDate) -> Self {
        let counts = reconcile_as_of(periods, tax_year, today);
        Self {
            tax_year,
            result: evaluate(counts),
            source: CalculationSource::DateRanges {
                periods: periods.to_vec(),
            },
        }
    }

    /// Periods behind the counts, if the calculation came from date ranges.
    pub fn periods(&self) -> Option<&[TravelPeriod]> {
        match &self.source {
            CalculationSource::Manual => None,
            CalculationSource::DateRanges { periods } => Some(periods),
        }
    }
}
