//! Analysis Configuration Module
//!
//! Thresholds and limits for the classifier and the aggregator. Both configs
//! default to the legacy production values in [`defaults`] and are passed to
//! the components at construction — there is no process-wide config global,
//! so two dashboards with different tunings can share one process.

pub mod defaults;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tunables for the compliance classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Calendar year whose observations form the regulatory baseline.
    pub baseline_cutoff_year: i32,
    /// Baseline fallback: first N observations when the cutoff year is empty.
    pub baseline_fallback_samples: usize,
    /// Trailing window (months) for the current vegetation state.
    pub current_window_months: u32,
    /// Percent variation strictly below this is non-compliant.
    pub degradation_threshold_pct: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            baseline_cutoff_year: defaults::BASELINE_CUTOFF_YEAR,
            baseline_fallback_samples: defaults::BASELINE_FALLBACK_SAMPLES,
            current_window_months: defaults::CURRENT_WINDOW_MONTHS,
            degradation_threshold_pct: defaults::DEGRADATION_THRESHOLD_PCT,
        }
    }
}

/// Tunables for the production/financial aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Reference price fallback (USD per m³ oil) for periods with no price row.
    pub default_oil_price_usd: f64,
    /// Last month index included in the type curve.
    pub type_curve_max_month: u32,
    /// Minimum total gas production (Mm³) for venting-ranking inclusion.
    pub venting_materiality_mm3: f64,
    /// Maximum companies returned by the venting ranking.
    pub venting_ranking_limit: usize,
    /// Start of the fixed recent period the venting ranking aggregates over.
    pub venting_period_start: NaiveDate,
    /// Completion-date cutoff for DUC inventory.
    pub duc_completion_cutoff: NaiveDate,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            default_oil_price_usd: defaults::DEFAULT_OIL_PRICE_USD,
            type_curve_max_month: defaults::TYPE_CURVE_MAX_MONTH,
            venting_materiality_mm3: defaults::VENTING_MATERIALITY_MM3,
            venting_ranking_limit: defaults::VENTING_RANKING_LIMIT,
            venting_period_start: defaults::venting_period_start(),
            duc_completion_cutoff: defaults::duc_completion_cutoff(),
        }
    }
}
