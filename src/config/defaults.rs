//! System-wide default constants.
//!
//! Centralises the magic numbers inherited from the legacy dashboards and
//! queries. None of these values have a documented derivation beyond "what
//! production has been running with" — keep them stable unless the regulator
//! or the commercial team says otherwise. Grouped by subsystem.

use chrono::NaiveDate;

// ============================================================================
// Compliance Classifier
// ============================================================================

/// Regulatory cutoff year: the baseline mean is taken over this calendar year.
///
/// EUDR-style rules measure degradation against end-of-2020 vegetation state.
pub const BASELINE_CUTOFF_YEAR: i32 = 2020;

/// Observations used for the baseline when the cutoff year has no samples.
///
/// Falls back to the first N observations of the (chronologically sorted)
/// series.
pub const BASELINE_FALLBACK_SAMPLES: usize = 6;

/// Trailing window over which the current vegetation state is averaged
/// (months before the most recent observation).
pub const CURRENT_WINDOW_MONTHS: u32 = 12;

/// Degradation threshold (percent variation vs baseline).
///
/// Strictly below this ⇒ non-compliant; exactly at the threshold is still
/// compliant.
pub const DEGRADATION_THRESHOLD_PCT: f64 = -15.0;

// ============================================================================
// Production / Financial Aggregator
// ============================================================================

/// Reference oil price (USD per m³) used when the price table has no row for
/// a period. Mirrors the `COALESCE(precio_usd, 70)` of the legacy query.
pub const DEFAULT_OIL_PRICE_USD: f64 = 70.0;

/// Gas is reported in thousands of m³; GOR wants m³ gas per m³ oil.
pub const GOR_UNIT_FACTOR: f64 = 1000.0;

/// Type-curve window: month indices 0..=24 inclusive (first two years).
pub const TYPE_CURVE_MAX_MONTH: u32 = 24;

// ============================================================================
// Venting Ranking
// ============================================================================

/// Companies below this total gas production (Mm³) over the ranking period
/// are excluded as immaterial.
pub const VENTING_MATERIALITY_MM3: f64 = 1_000_000.0;

/// Ranking returns at most this many companies.
pub const VENTING_RANKING_LIMIT: usize = 10;

/// Fixed start of the "recent period" the venting ranking looks at.
pub fn venting_period_start() -> NaiveDate {
    // 2023-01-01 is always a valid date
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

// ============================================================================
// DUC Inventory
// ============================================================================

/// Wells completed before this date are too old to count as DUC backlog.
pub fn duc_completion_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

/// Row limit for the georeferenced (map) inventory.
pub const DUC_MAP_ROW_LIMIT: usize = 50;

/// Row limit for the counts-only (reduced capability) inventory.
pub const DUC_LIST_ROW_LIMIT: usize = 10;

// ============================================================================
// Simulated NDVI Provider
// ============================================================================

/// First month of the simulated series.
pub fn ndvi_sim_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Number of monthly samples in the simulated series (2020-01 .. 2025-12).
pub const NDVI_SIM_MONTHS: usize = 72;

/// Mean level of the simulated seasonal signal.
pub const NDVI_SIM_BASE: f64 = 0.4;

/// Amplitude of the simulated seasonal signal.
pub const NDVI_SIM_AMPLITUDE: f64 = 0.3;

/// Phase sweep of the seasonal sine over the whole series.
pub const NDVI_SIM_PHASE_SPAN: f64 = 20.0;

/// Standard deviation of the Gaussian noise added to each sample.
pub const NDVI_SIM_NOISE_STD: f64 = 0.05;
