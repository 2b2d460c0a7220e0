//! NDVI observation providers.
//!
//! The classifier consumes an [`ObservationSeries`] and does not care where
//! it came from. Production deployments plug a satellite-imagery client into
//! [`NdviProvider`]; when no imagery service is configured, [`SimulatedNdvi`]
//! supplies a deterministic stand-in series so the compliance panel keeps
//! rendering.
//!
//! The simulated series is reproducible (same asset name ⇒ same series) but
//! makes no claim of realism: a seasonal sine around a fixed mean with
//! Gaussian noise, sampled monthly at month end.

use chrono::{Days, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::config::defaults;
use crate::types::{NdviObservation, ObservationSeries};

/// Supplier of per-asset vegetation-index series.
///
/// Implementations return an empty series when they have nothing for the
/// asset; they never surface transport errors to the classifier.
pub trait NdviProvider {
    fn series_for(&self, asset_name: &str, latitude: f64, longitude: f64) -> ObservationSeries;
}

/// Deterministic pseudo-random NDVI fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedNdvi;

impl SimulatedNdvi {
    /// Generate the simulated series for an asset name.
    ///
    /// Seeded by an FNV-1a hash of the name, so equal names always yield
    /// identical series and different names diverge (the legacy generator
    /// seeded on the name's *length*, which collided constantly).
    pub fn series(asset_name: &str) -> ObservationSeries {
        let mut rng = StdRng::seed_from_u64(fnv1a(asset_name.as_bytes()));
        let noise = Normal::new(0.0, defaults::NDVI_SIM_NOISE_STD).ok();

        let months = defaults::NDVI_SIM_MONTHS;
        let mut observations = Vec::with_capacity(months);
        for i in 0..months {
            let Some(date) = month_end(defaults::ndvi_sim_start(), i as u32) else {
                continue;
            };
            let phase = defaults::NDVI_SIM_PHASE_SPAN * i as f64 / (months - 1) as f64;
            let mut ndvi = defaults::NDVI_SIM_BASE + defaults::NDVI_SIM_AMPLITUDE * phase.sin();
            if let Some(noise) = &noise {
                ndvi += noise.sample(&mut rng);
            }
            observations.push(NdviObservation { date, ndvi });
        }
        debug!(asset_name, samples = observations.len(), "generated simulated NDVI series");
        ObservationSeries::new(observations)
    }
}

impl NdviProvider for SimulatedNdvi {
    fn series_for(&self, asset_name: &str, _latitude: f64, _longitude: f64) -> ObservationSeries {
        Self::series(asset_name)
    }
}

/// Last day of the month `offset` months after `start`'s month.
fn month_end(start: NaiveDate, offset: u32) -> Option<NaiveDate> {
    start
        .checked_add_months(Months::new(offset + 1))?
        .checked_sub_days(Days::new(1))
}

/// FNV-1a, 64-bit — stable across platforms and runs.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
