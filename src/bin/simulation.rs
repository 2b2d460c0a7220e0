//! Synthetic Dataset Simulation
//!
//! Fabricates a reproducible well-level production dataset plus a well
//! registry, loads it into the in-memory source, and runs every aggregation
//! and one compliance classification end to end. Used for demoing the KPI
//! surface without a database and for eyeballing aggregation output.
//!
//! # Usage
//! ```bash
//! ./simulation --wells 500 --seed 7 | jq .venting_ranking
//! ```

use anyhow::Context;
use chrono::{Months, NaiveDate};
use clap::Parser;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use cuenca_analytics::{
    AggregatorConfig, ClassifierConfig, ComplianceClassifier, MemorySource,
    ProductionAggregator, ProductionRecord, SimulatedNdvi, WellRecord,
};

// ============================================================================
// Field Constants
// ============================================================================

/// Company mix observed in the basin (share of wells).
const COMPANIES: [(&str, f64); 7] = [
    ("YPF S.A.", 0.40),
    ("PAN AMERICAN ENERGY", 0.15),
    ("VISTA", 0.15),
    ("SHELL", 0.10),
    ("TECPETROL", 0.10),
    ("PLUSPETROL", 0.05),
    ("TOTAL", 0.05),
];

/// Share of wells left drilled-but-uncompleted.
const DUC_SHARE: f64 = 0.30;

/// Initial oil rate band (m³/month).
const INITIAL_OIL_MIN: f64 = 2_000.0;
const INITIAL_OIL_MAX: f64 = 9_000.0;

/// Hyperbolic-ish monthly decline factor.
const MONTHLY_DECLINE: f64 = 0.92;

/// Gas-oil ratio band (Mm³ gas per m³ oil, before the ×1000 display factor).
const GOR_MIN: f64 = 0.8;
const GOR_MAX: f64 = 2.5;

/// Vent fraction band applied to produced gas (matches the field repair
/// script that backfilled venting data: 0.5 % .. 4.5 %).
const VENT_FRACTION_MIN: f64 = 0.005;
const VENT_FRACTION_MAX: f64 = 0.045;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "simulation", about = "Generate a synthetic basin dataset and print its KPIs")]
struct Args {
    /// Number of wells to fabricate
    #[arg(long, default_value_t = 500)]
    wells: usize,

    /// Months of production history per producing well
    #[arg(long, default_value_t = 20)]
    months: u32,

    /// RNG seed (same seed ⇒ same dataset)
    #[arg(long, default_value_t = 7, env = "SIMULATION_SEED")]
    seed: u64,

    /// Company whose KPIs are printed in detail
    #[arg(long, default_value = "YPF S.A.")]
    company: String,

    /// Asset name fed to the simulated NDVI classifier
    #[arg(long, default_value = "Lote Litoral Norte")]
    asset: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let source = build_dataset(&args)?;

    let today = NaiveDate::from_ymd_opt(2025, 6, 1).context("invalid reference date")?;
    let aggregator = ProductionAggregator::new(source, AggregatorConfig::default());

    let classifier = ComplianceClassifier::new(ClassifierConfig::default());
    let verdict = classifier.classify(&SimulatedNdvi::series(&args.asset));

    let report = json!({
        "companies": aggregator.companies(),
        "production": aggregator.production_rollup(&args.company, None),
        "efficiency": aggregator.efficiency_rollup(&args.company, None),
        "type_curve": aggregator.type_curve(&args.company, None),
        "venting_ranking": aggregator.venting_ranking(),
        "duc_inventory": aggregator.duc_inventory(today),
        "compliance": {
            "asset": args.asset,
            "state": verdict.state.status_label(),
            "rationale": verdict.rationale,
            "baseline": verdict.baseline,
            "current": verdict.current,
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Fabricate the registry and production history.
fn build_dataset(args: &Args) -> anyhow::Result<MemorySource> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let weights = WeightedIndex::new(COMPANIES.iter().map(|(_, w)| *w))
        .context("company weights must be non-zero")?;
    let calendar_start =
        NaiveDate::from_ymd_opt(2023, 1, 1).context("invalid calendar start")?;

    let mut source = MemorySource::new();
    for well_id in 0..args.wells as u64 {
        let company = COMPANIES[weights.sample(&mut rng)].0;
        let completed = calendar_start
            .checked_add_months(Months::new(rng.gen_range(0..18)))
            .context("completion date overflow")?;
        let is_duc = rng.gen_bool(DUC_SHARE);
        let production_start = if is_duc {
            None
        } else {
            completed.checked_add_months(Months::new(rng.gen_range(1..4)))
        };

        source.insert_well(WellRecord {
            well_id: 10_000 + well_id,
            company: company.to_owned(),
            drilling_completed: completed,
            production_start,
            latitude: Some(-38.35 + rng.gen_range(-0.05..0.05)),
            longitude: Some(-68.80 + rng.gen_range(-0.05..0.05)),
            pipeline_distance_km: Some(rng.gen_range(0.5..25.0)),
            connection_capex_usd: None,
        });

        let Some(start) = production_start else { continue };
        let initial_oil = rng.gen_range(INITIAL_OIL_MIN..INITIAL_OIL_MAX);
        let gor = rng.gen_range(GOR_MIN..GOR_MAX);
        for month in 0..args.months {
            let Some(date) = start.checked_add_months(Months::new(month)) else {
                continue;
            };
            let oil_m3 = initial_oil * MONTHLY_DECLINE.powi(month as i32);
            let gas_mm3 = oil_m3 * gor;
            let vent_fraction = rng.gen_range(VENT_FRACTION_MIN..VENT_FRACTION_MAX);
            source.insert_record(ProductionRecord {
                well_id: 10_000 + well_id,
                company: company.to_owned(),
                date,
                oil_m3,
                gas_mm3,
                water_m3: oil_m3 * rng.gen_range(0.3..1.2),
                vented_gas_mm3: gas_mm3 * vent_fraction,
            });
        }
    }

    // Sparse price table: odd months priced, even months exercise the
    // 70 USD fallback.
    for year in 2023..=2025 {
        for month in (1u32..=12).step_by(2) {
            source.insert_price(year, month, 72.5 + f64::from(month));
        }
    }

    tracing::info!(
        wells = args.wells,
        records = source.record_count(),
        seed = args.seed,
        "synthetic dataset ready"
    );
    Ok(source)
}
