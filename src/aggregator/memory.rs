//! In-memory [`ProductionSource`] implementation.
//!
//! Backs the test suites and the simulation binary. Also useful as a
//! reference for what each trait method is expected to return.

use std::collections::{BTreeSet, HashMap};

use crate::types::{DateRange, ProductionRecord, WellRecord};

use super::source::{ProductionSource, SourceError};

/// Production data held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<ProductionRecord>,
    wells: Vec<WellRecord>,
    prices: HashMap<(i32, u32), f64>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&mut self, record: ProductionRecord) {
        self.records.push(record);
    }

    pub fn insert_well(&mut self, well: WellRecord) {
        self.wells.push(well);
    }

    /// Set the reference price for a (year, month).
    pub fn insert_price(&mut self, year: i32, month: u32, price_usd: f64) {
        self.prices.insert((year, month), price_usd);
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl ProductionSource for MemorySource {
    fn companies(&self) -> Result<Vec<String>, SourceError> {
        let companies: BTreeSet<&str> =
            self.records.iter().map(|r| r.company.as_str()).collect();
        Ok(companies.into_iter().map(str::to_owned).collect())
    }

    fn company_records(
        &self,
        company: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<ProductionRecord>, SourceError> {
        let range = range.unwrap_or_default();
        Ok(self
            .records
            .iter()
            .filter(|r| r.company == company && range.contains(r.date))
            .cloned()
            .collect())
    }

    fn records_in_range(&self, range: DateRange) -> Result<Vec<ProductionRecord>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| range.contains(r.date))
            .cloned()
            .collect())
    }

    fn reference_price(&self, year: i32, month: u32) -> Result<Option<f64>, SourceError> {
        Ok(self.prices.get(&(year, month)).copied())
    }

    fn well_registry(&self) -> Result<Vec<WellRecord>, SourceError> {
        Ok(self.wells.clone())
    }
}

/// A source that always fails. Used by the test suites to exercise the
/// degraded (empty-result) paths of the aggregator.
#[derive(Debug, Default)]
pub struct UnavailableSource;

impl ProductionSource for UnavailableSource {
    fn companies(&self) -> Result<Vec<String>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }

    fn company_records(
        &self,
        _company: &str,
        _range: Option<DateRange>,
    ) -> Result<Vec<ProductionRecord>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }

    fn records_in_range(&self, _range: DateRange) -> Result<Vec<ProductionRecord>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }

    fn reference_price(&self, _year: i32, _month: u32) -> Result<Option<f64>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }

    fn well_registry(&self) -> Result<Vec<WellRecord>, SourceError> {
        Err(SourceError::Unavailable("connection refused".into()))
    }
}
