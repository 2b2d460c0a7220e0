//! DUC inventory — drilled-but-uncompleted well backlog per company.
//!
//! The legacy backend ran a rich GIS query and, when the registry lacked the
//! coordinate columns, caught the failure and re-ran a bare count query. That
//! control flow is replaced with a typed capability split: the caller sees
//! either a georeferenced inventory or an explicitly reduced counts-only one,
//! and can render a map or a plain table accordingly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{defaults, AggregatorConfig};
use crate::types::WellRecord;

/// One company's DUC cluster with mean position and connection economics.
///
/// Means are taken over the company's georeferenced DUCs only; distance and
/// capex means are `None` when the GIS enrichment has not produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DucClusterRow {
    pub company: String,
    pub ducs: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub pipeline_distance_km: Option<f64>,
    pub connection_capex_usd: Option<f64>,
}

/// One company's DUC count (reduced capability — no map data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DucCountRow {
    pub company: String,
    pub ducs: usize,
}

/// DUC inventory result with explicit capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DucInventory {
    /// Registry carries coordinates: map-ready clusters, up to 50 rows.
    Georeferenced(Vec<DucClusterRow>),
    /// No coordinates in the registry: counts only, up to 10 rows.
    CountsOnly(Vec<DucCountRow>),
}

impl DucInventory {
    pub fn is_reduced(&self) -> bool {
        matches!(self, DucInventory::CountsOnly(_))
    }

    pub fn company_count(&self) -> usize {
        match self {
            DucInventory::Georeferenced(rows) => rows.len(),
            DucInventory::CountsOnly(rows) => rows.len(),
        }
    }
}

/// Build the inventory from a registry snapshot.
pub(super) fn build(wells: &[WellRecord], today: NaiveDate, config: &AggregatorConfig) -> DucInventory {
    let eligible: Vec<&WellRecord> = wells
        .iter()
        .filter(|w| w.drilling_completed >= config.duc_completion_cutoff && w.is_duc(today))
        .collect();

    let georeferenced: Vec<&WellRecord> = eligible
        .iter()
        .copied()
        .filter(|w| w.latitude.is_some() && w.longitude.is_some())
        .collect();

    if georeferenced.is_empty() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for well in &eligible {
            *counts.entry(well.company.as_str()).or_insert(0) += 1;
        }
        let mut rows: Vec<DucCountRow> = counts
            .into_iter()
            .map(|(company, ducs)| DucCountRow { company: company.to_owned(), ducs })
            .collect();
        rows.sort_by(|a, b| b.ducs.cmp(&a.ducs).then_with(|| a.company.cmp(&b.company)));
        rows.truncate(defaults::DUC_LIST_ROW_LIMIT);
        debug!(companies = rows.len(), "DUC inventory built without map data");
        return DucInventory::CountsOnly(rows);
    }

    #[derive(Default)]
    struct Cluster {
        ducs: usize,
        lat_sum: f64,
        lon_sum: f64,
        dist_sum: f64,
        dist_count: usize,
        capex_sum: f64,
        capex_count: usize,
    }

    let mut clusters: BTreeMap<&str, Cluster> = BTreeMap::new();
    for well in &georeferenced {
        let cluster = clusters.entry(well.company.as_str()).or_default();
        cluster.ducs += 1;
        // Both present per the filter above.
        cluster.lat_sum += well.latitude.unwrap_or_default();
        cluster.lon_sum += well.longitude.unwrap_or_default();
        if let Some(distance) = well.pipeline_distance_km {
            cluster.dist_sum += distance;
            cluster.dist_count += 1;
        }
        if let Some(capex) = well.connection_capex_usd {
            cluster.capex_sum += capex;
            cluster.capex_count += 1;
        }
    }

    let mut rows: Vec<DucClusterRow> = clusters
        .into_iter()
        .map(|(company, c)| DucClusterRow {
            company: company.to_owned(),
            ducs: c.ducs,
            latitude: c.lat_sum / c.ducs as f64,
            longitude: c.lon_sum / c.ducs as f64,
            pipeline_distance_km: (c.dist_count > 0).then(|| c.dist_sum / c.dist_count as f64),
            connection_capex_usd: (c.capex_count > 0).then(|| c.capex_sum / c.capex_count as f64),
        })
        .collect();
    rows.sort_by(|a, b| b.ducs.cmp(&a.ducs).then_with(|| a.company.cmp(&b.company)));
    rows.truncate(defaults::DUC_MAP_ROW_LIMIT);
    debug!(companies = rows.len(), "DUC inventory built with map data");
    DucInventory::Georeferenced(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn duc(id: u64, company: &str, lat: Option<f64>) -> WellRecord {
        WellRecord {
            well_id: id,
            company: company.into(),
            drilling_completed: d(2023, 6, 1),
            production_start: None,
            latitude: lat,
            longitude: lat.map(|_| -68.8),
            pipeline_distance_km: lat.map(|_| 4.0),
            connection_capex_usd: None,
        }
    }

    #[test]
    fn counts_only_when_registry_has_no_coordinates() {
        let wells = vec![duc(1, "YPF", None), duc(2, "YPF", None), duc(3, "VISTA", None)];
        let inventory = build(&wells, d(2024, 6, 1), &AggregatorConfig::default());
        assert!(inventory.is_reduced());
        let DucInventory::CountsOnly(rows) = inventory else { panic!("expected counts") };
        assert_eq!(rows[0], DucCountRow { company: "YPF".into(), ducs: 2 });
        assert_eq!(rows[1].ducs, 1);
    }

    #[test]
    fn georeferenced_clusters_average_positions() {
        let mut a = duc(1, "YPF", Some(-38.30));
        a.connection_capex_usd = Some(240_000.0);
        let b = duc(2, "YPF", Some(-38.40));
        // An un-georeferenced DUC should not pull the cluster mean around.
        let c = duc(3, "YPF", None);
        let inventory = build(&[a, b, c], d(2024, 6, 1), &AggregatorConfig::default());
        let DucInventory::Georeferenced(rows) = inventory else { panic!("expected map data") };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ducs, 2);
        assert!((rows[0].latitude + 38.35).abs() < 1e-9);
        assert_eq!(rows[0].connection_capex_usd, Some(240_000.0));
        assert_eq!(rows[0].pipeline_distance_km, Some(4.0));
    }

    #[test]
    fn old_completions_and_producing_wells_are_excluded() {
        let mut old = duc(1, "YPF", None);
        old.drilling_completed = d(2021, 3, 1);
        let mut producing = duc(2, "YPF", None);
        producing.production_start = Some(d(2023, 9, 1));
        let inventory = build(&[old, producing], d(2024, 6, 1), &AggregatorConfig::default());
        assert_eq!(inventory.company_count(), 0);
    }
}
