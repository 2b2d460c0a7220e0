//! Production data source seam.
//!
//! The aggregator never talks to a database directly: it consumes this trait,
//! and the surrounding application decides whether rows come from Postgres,
//! an HTTP backend, or the in-memory store used by tests and the simulation
//! binary. The trait is the only place a failure can originate; the
//! aggregator recovers every failure locally.

use thiserror::Error;

use crate::types::{DateRange, ProductionRecord, WellRecord};

/// Failure at the data-source seam.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying store could not be reached at all.
    #[error("production source unavailable: {0}")]
    Unavailable(String),
    /// The store answered but rows could not be decoded.
    #[error("malformed production data: {0}")]
    Malformed(String),
}

/// Black-box supplier of raw production rows, price references, and the well
/// registry.
///
/// Implementations may return rows in any order; the aggregator sorts. Any
/// timeout or retry behavior belongs to the implementation, not the caller.
pub trait ProductionSource {
    /// Distinct company identifiers present in the production data.
    fn companies(&self) -> Result<Vec<String>, SourceError>;

    /// Production rows for one company, optionally restricted to a range.
    fn company_records(
        &self,
        company: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<ProductionRecord>, SourceError>;

    /// Production rows for every company within a range.
    fn records_in_range(&self, range: DateRange) -> Result<Vec<ProductionRecord>, SourceError>;

    /// Reference oil price (USD per m³) for a (year, month), if the price
    /// table has a row for it.
    fn reference_price(&self, year: i32, month: u32) -> Result<Option<f64>, SourceError>;

    /// Full well registry (padron) snapshot.
    fn well_registry(&self) -> Result<Vec<WellRecord>, SourceError>;
}
