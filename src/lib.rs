//! Cuenca Analytics: production intelligence and compliance classification
//!
//! Shared analytic core behind two dashboard products: an oil & gas
//! production-intelligence front-end and an agricultural
//! deforestation-compliance front-end.
//!
//! ## Architecture
//!
//! - **Compliance Classifier**: NDVI time series → {Pending, Compliant,
//!   NonCompliant} verdict with baseline/current means and a rationale
//! - **Production Aggregator**: well-level records → company KPIs
//!   (production + revenue, efficiency/GOR, type curves, venting ranking,
//!   DUC inventory)
//! - **NDVI Providers**: satellite-imagery seam plus a deterministic
//!   simulated fallback
//!
//! Both components are pure, synchronous, and never raise to the caller:
//! degraded inputs classify as `Pending`, and source failures aggregate to
//! empty results. All I/O framing belongs to the surrounding application.

pub mod aggregator;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod ndvi;
pub mod types;

// Re-export classifier surface
pub use classifier::ComplianceClassifier;
pub use types::{ComplianceState, ComplianceVerdict, NdviObservation, ObservationSeries};

// Re-export aggregator surface
pub use aggregator::{
    DucInventory, MemorySource, ProductionAggregator, ProductionSource, SourceError,
};
pub use types::{
    DateRange, EfficiencyRow, ProductionPeriodRow, ProductionRecord, TypeCurvePoint, VentingKpi,
    WellRecord,
};

// Re-export configuration
pub use config::{AggregatorConfig, ClassifierConfig};

// Re-export NDVI providers
pub use ndvi::{NdviProvider, SimulatedNdvi};
