//! Production/Financial Aggregator
//!
//! Rolls raw well-level production rows up into the company-level KPIs the
//! dashboards chart:
//!
//! - Production + revenue per period (reference price with fixed fallback)
//! - Efficiency per period (water handling, gas-oil ratio)
//! - Type-curve normalization (cross-well decline curve aligned at month 0)
//! - Venting-ratio ranking across companies
//! - DUC inventory (georeferenced when the registry carries coordinates)
//!
//! ## Failure contract
//!
//! Every operation degrades to an empty result when the underlying source
//! fails — a broken panel must never take the page down with it. Failures
//! are logged via `tracing::warn!` and swallowed; no operation returns a
//! `Result`.

mod inventory;
mod memory;
mod source;

pub use inventory::{DucClusterRow, DucCountRow, DucInventory};
pub use memory::{MemorySource, UnavailableSource};
pub use source::{ProductionSource, SourceError};

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::config::AggregatorConfig;
use crate::types::{
    months_between, DateRange, EfficiencyRow, ProductionPeriodRow, ProductionRecord,
    TypeCurvePoint, VentingKpi,
};

/// Company-level KPI aggregator over a [`ProductionSource`].
#[derive(Debug, Clone)]
pub struct ProductionAggregator<S> {
    source: S,
    config: AggregatorConfig,
}

impl<S: ProductionSource> ProductionAggregator<S> {
    pub fn new(source: S, config: AggregatorConfig) -> Self {
        Self { source, config }
    }

    /// Distinct companies, ascending, for dashboard selectors.
    pub fn companies(&self) -> Vec<String> {
        match self.source.companies() {
            Ok(mut companies) => {
                companies.sort();
                companies
            }
            Err(err) => {
                warn!(error = %err, "company listing unavailable");
                Vec::new()
            }
        }
    }

    /// Per-period oil/gas totals and derived revenue for one company.
    ///
    /// Revenue is Σ oil × reference price for the period's (year, month);
    /// where the price table has no row, the configured fallback price
    /// applies — the fallback is part of the contract, not an error.
    pub fn production_rollup(
        &self,
        company: &str,
        range: Option<DateRange>,
    ) -> Vec<ProductionPeriodRow> {
        let records = self.fetch(company, range, "production rollup");

        let mut periods: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for record in &records {
            let entry = periods.entry(record.date).or_insert((0.0, 0.0));
            entry.0 += record.oil_m3;
            entry.1 += record.gas_mm3;
        }

        periods
            .into_iter()
            .map(|(period, (oil_m3, gas_mm3))| {
                let price = self.price_for(period);
                ProductionPeriodRow {
                    period,
                    oil_m3,
                    gas_mm3,
                    revenue_usd: oil_m3 * price,
                }
            })
            .collect()
    }

    /// Per-period water volume and gas-oil ratio for one company.
    ///
    /// GOR = (Σ gas × 1000) / Σ oil over the period; 0 when no oil was
    /// produced (never a division by zero).
    pub fn efficiency_rollup(
        &self,
        company: &str,
        range: Option<DateRange>,
    ) -> Vec<EfficiencyRow> {
        let records = self.fetch(company, range, "efficiency rollup");

        let mut periods: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();
        for record in &records {
            let entry = periods.entry(record.date).or_insert((0.0, 0.0, 0.0));
            entry.0 += record.water_m3;
            entry.1 += record.gas_mm3;
            entry.2 += record.oil_m3;
        }

        periods
            .into_iter()
            .map(|(period, (water_m3, gas_mm3, oil_m3))| {
                let gor = if oil_m3 > 0.0 {
                    gas_mm3 * crate::config::defaults::GOR_UNIT_FACTOR / oil_m3
                } else {
                    0.0
                };
                EfficiencyRow { period, water_m3, gor }
            })
            .collect()
    }

    /// Cross-well normalized decline curve for one company.
    ///
    /// Each well's observations are re-indexed relative to that well's own
    /// first production month, so wells spudded years apart line up at month
    /// zero. Oil volume is then averaged across all well-months per index,
    /// restricted to the first `type_curve_max_month` months inclusive.
    pub fn type_curve(&self, company: &str, range: Option<DateRange>) -> Vec<TypeCurvePoint> {
        let records = self.fetch(company, range, "type curve");

        // First production month per well.
        let mut first_month: BTreeMap<u64, NaiveDate> = BTreeMap::new();
        for record in &records {
            first_month
                .entry(record.well_id)
                .and_modify(|d| *d = (*d).min(record.date))
                .or_insert(record.date);
        }

        // Average across all well-months sharing a month index.
        let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for record in &records {
            let Some(start) = first_month.get(&record.well_id) else {
                continue;
            };
            let index = months_between(*start, record.date);
            if index < 0 || index > self.config.type_curve_max_month as i32 {
                continue;
            }
            let entry = buckets.entry(index as u32).or_insert((0.0, 0));
            entry.0 += record.oil_m3;
            entry.1 += 1;
        }

        buckets
            .into_iter()
            .map(|(month_index, (total, count))| TypeCurvePoint {
                month_index,
                avg_oil_m3: total / count as f64,
            })
            .collect()
    }

    /// Company venting ranking over the fixed recent period.
    ///
    /// Companies below the gas materiality threshold are excluded; the rest
    /// are ranked descending by vented / (produced + vented) × 100 and capped
    /// at the configured limit.
    pub fn venting_ranking(&self) -> Vec<VentingKpi> {
        let range = DateRange::since(self.config.venting_period_start);
        let records = match self.source.records_in_range(range) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "venting ranking source unavailable, returning empty");
                return Vec::new();
            }
        };

        let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        for record in &records {
            let entry = totals.entry(record.company.as_str()).or_insert((0.0, 0.0));
            entry.0 += record.gas_mm3;
            entry.1 += record.vented_gas_mm3;
        }

        let mut ranking: Vec<VentingKpi> = totals
            .into_iter()
            .filter(|(_, (produced, _))| *produced > self.config.venting_materiality_mm3)
            .map(|(company, (produced, vented))| {
                let total = produced + vented;
                let ratio = if total > 0.0 { vented / total * 100.0 } else { 0.0 };
                VentingKpi {
                    company: company.to_owned(),
                    vent_ratio_pct: (ratio * 100.0).round() / 100.0,
                    vented_volume_mm3: vented,
                }
            })
            .collect();

        // Descending by ratio; company name breaks ties deterministically.
        ranking.sort_by(|a, b| {
            b.vent_ratio_pct
                .partial_cmp(&a.vent_ratio_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.company.cmp(&b.company))
        });
        ranking.truncate(self.config.venting_ranking_limit);
        debug!(companies = ranking.len(), "venting ranking computed");
        ranking
    }

    /// DUC inventory as of `today` — see [`DucInventory`] for the
    /// capability split between georeferenced and counts-only results.
    pub fn duc_inventory(&self, today: NaiveDate) -> DucInventory {
        let wells = match self.source.well_registry() {
            Ok(wells) => wells,
            Err(err) => {
                warn!(error = %err, "well registry unavailable, returning empty inventory");
                return DucInventory::CountsOnly(Vec::new());
            }
        };
        inventory::build(&wells, today, &self.config)
    }

    /// Fetch one company's rows, degrading to empty on source failure.
    fn fetch(
        &self,
        company: &str,
        range: Option<DateRange>,
        operation: &str,
    ) -> Vec<ProductionRecord> {
        match self.source.company_records(company, range) {
            Ok(records) => records,
            Err(err) => {
                warn!(company, operation, error = %err, "source unavailable, returning empty");
                Vec::new()
            }
        }
    }

    /// Reference price for a period, with the configured fallback when the
    /// price table has no row (or cannot be read).
    fn price_for(&self, period: NaiveDate) -> f64 {
        match self.source.reference_price(period.year(), period.month()) {
            Ok(Some(price)) => price,
            Ok(None) => self.config.default_oil_price_usd,
            Err(err) => {
                warn!(%period, error = %err, "price table unavailable, using fallback price");
                self.config.default_oil_price_usd
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn record(well: u64, company: &str, date: NaiveDate, oil: f64, gas: f64) -> ProductionRecord {
        ProductionRecord {
            well_id: well,
            company: company.into(),
            date,
            oil_m3: oil,
            gas_mm3: gas,
            water_m3: 0.0,
            vented_gas_mm3: 0.0,
        }
    }

    fn aggregator(source: MemorySource) -> ProductionAggregator<MemorySource> {
        ProductionAggregator::new(source, AggregatorConfig::default())
    }

    #[test]
    fn production_rollup_sums_wells_and_applies_price_fallback() {
        let mut source = MemorySource::new();
        source.insert_record(record(1, "YPF", d(2024, 1), 100.0, 50.0));
        source.insert_record(record(2, "YPF", d(2024, 1), 200.0, 70.0));
        source.insert_record(record(1, "YPF", d(2024, 2), 90.0, 45.0));
        source.insert_price(2024, 1, 80.0);
        // No price row for 2024-02: the 70 USD fallback must apply.

        let rows = aggregator(source).production_rollup("YPF", None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, d(2024, 1));
        assert!((rows[0].oil_m3 - 300.0).abs() < 1e-9);
        assert!((rows[0].revenue_usd - 300.0 * 80.0).abs() < 1e-9);
        assert!((rows[1].revenue_usd - 90.0 * 70.0).abs() < 1e-9);
    }

    #[test]
    fn efficiency_rollup_guards_gor_against_zero_oil() {
        let mut source = MemorySource::new();
        let mut r = record(1, "VISTA", d(2024, 3), 0.0, 120.0);
        r.water_m3 = 40.0;
        source.insert_record(r);

        let rows = aggregator(source).efficiency_rollup("VISTA", None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].gor, 0.0);
        assert!((rows[0].water_m3 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn type_curve_aligns_wells_at_month_zero() {
        let mut source = MemorySource::new();
        // Well 1 starts January, well 2 starts April; both decline from 100.
        for (i, month) in (1..=6).enumerate() {
            source.insert_record(record(1, "SHELL", d(2024, month), 100.0 - 10.0 * i as f64, 0.0));
        }
        for (i, month) in (4..=9).enumerate() {
            source.insert_record(record(2, "SHELL", d(2024, month), 100.0 - 10.0 * i as f64, 0.0));
        }

        let curve = aggregator(source).type_curve("SHELL", None);
        assert_eq!(curve.len(), 6);
        // Month-index 5 averages each well's own 5th month (both 50).
        let point = curve.iter().find(|p| p.month_index == 5).unwrap();
        assert!((point.avg_oil_m3 - 50.0).abs() < 1e-9);
        let zero = curve.iter().find(|p| p.month_index == 0).unwrap();
        assert!((zero.avg_oil_m3 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn type_curve_drops_months_past_the_window() {
        let mut source = MemorySource::new();
        for offset in 0..30u32 {
            let date = d(2020, 1)
                .checked_add_months(chrono::Months::new(offset))
                .unwrap();
            source.insert_record(record(1, "PAE", date, 50.0, 0.0));
        }
        let curve = aggregator(source).type_curve("PAE", None);
        assert_eq!(curve.len(), 25); // indices 0..=24
        assert!(curve.iter().all(|p| p.month_index <= 24));
    }

    #[test]
    fn venting_ranking_filters_sorts_and_caps() {
        let mut source = MemorySource::new();
        // Materiality threshold is 1,000,000 Mm³ of produced gas.
        let mut heavy = record(1, "A-HIGH-VENT", d(2023, 6), 0.0, 2_000_000.0);
        heavy.vented_gas_mm3 = 200_000.0;
        source.insert_record(heavy);
        let mut modest = record(2, "B-LOW-VENT", d(2023, 6), 0.0, 3_000_000.0);
        modest.vented_gas_mm3 = 30_000.0;
        source.insert_record(modest);
        let mut immaterial = record(3, "C-TINY", d(2023, 6), 0.0, 500.0);
        immaterial.vented_gas_mm3 = 400.0;
        source.insert_record(immaterial);
        // Pre-period rows must not count toward the ranking.
        let mut old = record(4, "B-LOW-VENT", d(2022, 6), 0.0, 1.0);
        old.vented_gas_mm3 = 1.0;
        source.insert_record(old);

        let ranking = aggregator(source).venting_ranking();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].company, "A-HIGH-VENT");
        assert!(ranking[0].vent_ratio_pct > ranking[1].vent_ratio_pct);
        assert!(ranking.iter().all(|k| k.company != "C-TINY"));
        // 200k / 2.2M ⇒ 9.09%
        assert!((ranking[0].vent_ratio_pct - 9.09).abs() < 1e-9);
    }

    #[test]
    fn every_operation_degrades_to_empty_when_source_is_down() {
        let agg = ProductionAggregator::new(UnavailableSource, AggregatorConfig::default());
        assert!(agg.companies().is_empty());
        assert!(agg.production_rollup("YPF", None).is_empty());
        assert!(agg.efficiency_rollup("YPF", None).is_empty());
        assert!(agg.type_curve("YPF", None).is_empty());
        assert!(agg.venting_ranking().is_empty());
        assert!(matches!(
            agg.duc_inventory(d(2024, 6)),
            DucInventory::CountsOnly(rows) if rows.is_empty()
        ));
    }
}
