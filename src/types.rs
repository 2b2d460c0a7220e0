//! Shared data structures for the production-intelligence and
//! compliance-classification core
//!
//! This module defines the tabular contracts the two analytic components
//! exchange with their callers:
//! - NDVI observation series consumed by the compliance classifier
//! - Compliance verdicts produced by the classifier
//! - Raw well-level production records consumed by the aggregator
//! - Per-period KPI rows produced by each aggregation operation

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// NDVI Observations
// ============================================================================

/// A single vegetation-index sample for one geographic asset.
///
/// NDVI is nominally in [-1, 1]; the bound is assumed, not enforced, because
/// upstream imagery pipelines occasionally deliver slightly out-of-range
/// values after cloud masking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviObservation {
    pub date: NaiveDate,
    pub ndvi: f64,
}

/// Ordered NDVI time series for one asset.
///
/// Observations are kept sorted ascending by date; the constructor sorts, so
/// callers may hand over samples in any order. The series is recomputed on
/// demand per asset and never persisted by this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    observations: Vec<NdviObservation>,
}

impl ObservationSeries {
    /// Build a series, sorting observations ascending by date.
    pub fn new(mut observations: Vec<NdviObservation>) -> Self {
        observations.sort_by_key(|obs| obs.date);
        Self { observations }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn observations(&self) -> &[NdviObservation] {
        &self.observations
    }

    /// Most recent observation date, if any.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|obs| obs.date)
    }
}

// ============================================================================
// Compliance Verdicts
// ============================================================================

/// Closed set of compliance states a classified asset can be in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum ComplianceState {
    /// Not enough data to decide either way.
    #[default]
    Pending,
    /// Vegetation index held up against the regulatory baseline.
    Compliant,
    /// Vegetation index degraded past the allowed threshold.
    NonCompliant,
}

impl ComplianceState {
    /// Dashboard status label (matches the legacy traffic-light legend).
    pub fn status_label(&self) -> &'static str {
        match self {
            ComplianceState::Pending => "Pendiente",
            ComplianceState::Compliant => "Verde",
            ComplianceState::NonCompliant => "Rojo",
        }
    }
}

impl std::fmt::Display for ComplianceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceState::Pending => write!(f, "Pending"),
            ComplianceState::Compliant => write!(f, "Compliant"),
            ComplianceState::NonCompliant => write!(f, "Non-Compliant"),
        }
    }
}

/// Outcome of classifying one asset's observation series.
///
/// Immutable once produced; each classification call is stateless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub state: ComplianceState,
    /// Human-readable explanation for the certificate / audit trail.
    pub rationale: String,
    /// Mean NDVI over the regulatory baseline window (0.0 when unknown).
    pub baseline: f64,
    /// Mean NDVI over the trailing observation window (0.0 when unknown).
    pub current: f64,
}

impl ComplianceVerdict {
    /// Verdict gates certificate issuance: only a compliant asset gets one.
    pub fn certificate_eligible(&self) -> bool {
        self.state == ComplianceState::Compliant
    }
}

// ============================================================================
// Production Records (aggregator input)
// ============================================================================

/// One raw well-level production row, as delivered by the upstream registry.
///
/// Volumes follow the regulator's reporting units: oil and water in m³,
/// gas in thousands of m³ (Mm³). Volumes are non-negative; revenue is always
/// derived downstream, never carried on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub well_id: u64,
    pub company: String,
    /// Reporting period (first day of the production month).
    pub date: NaiveDate,
    pub oil_m3: f64,
    pub gas_mm3: f64,
    pub water_m3: f64,
    pub vented_gas_mm3: f64,
}

/// One row of the well registry (padron), used for DUC inventory.
///
/// Geographic and cost columns are optional: they only exist once the GIS
/// enrichment pipeline has run against the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    pub well_id: u64,
    pub company: String,
    pub drilling_completed: NaiveDate,
    /// `None` means no recorded production start — the well is a DUC.
    pub production_start: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pipeline_distance_km: Option<f64>,
    pub connection_capex_usd: Option<f64>,
}

impl WellRecord {
    /// Drilled-but-uncompleted as of `today`: drilling finished, and either
    /// no production start is recorded or it lies in the future.
    pub fn is_duc(&self, today: NaiveDate) -> bool {
        match self.production_start {
            None => true,
            Some(start) => start > today,
        }
    }
}

// ============================================================================
// Date Ranges
// ============================================================================

/// Optional inclusive date filter for aggregation queries.
///
/// Hashable so it can key caller-side caches together with the company id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Open range starting at `from` (inclusive).
    pub fn since(from: NaiveDate) -> Self {
        Self { from: Some(from), to: None }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// Aggregation Output Rows
// ============================================================================

/// Per-period production totals with derived revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPeriodRow {
    pub period: NaiveDate,
    pub oil_m3: f64,
    pub gas_mm3: f64,
    /// Σ oil × reference price, with the fixed fallback price where the
    /// price table has no matching (year, month) row.
    pub revenue_usd: f64,
}

/// Per-period water handling and gas-oil ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRow {
    pub period: NaiveDate,
    pub water_m3: f64,
    /// (Σ gas × 1000) / Σ oil for the period; 0 when no oil was produced.
    pub gor: f64,
}

/// One point of the cross-well normalized decline curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeCurvePoint {
    /// Months since the producing well's own first production month.
    pub month_index: u32,
    /// Mean oil volume across all well-months at this index.
    pub avg_oil_m3: f64,
}

/// Venting KPI for one company over the ranking period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentingKpi {
    pub company: String,
    /// vented / (produced + vented) × 100, in [0, 100], rounded to two
    /// decimals so rankings are stable across float noise.
    pub vent_ratio_pct: f64,
    pub vented_volume_mm3: f64,
}

/// Whole calendar months between two dates, ignoring day-of-month.
///
/// Matches `(Y2 - Y1) * 12 + (M2 - M1)` on the reporting periods, which is
/// how the type curve aligns wells at month zero.
pub fn months_between(earlier: NaiveDate, later: NaiveDate) -> i32 {
    (later.year() - earlier.year()) * 12 + (later.month() as i32 - earlier.month() as i32)
}
