//! Compliance Classifier — NDVI Series → Verdict
//!
//! Turns a per-asset vegetation-index time series into a three-state
//! compliance verdict for certificate issuance:
//!
//! 1. Baseline = mean NDVI over the regulatory cutoff year (first six
//!    observations when the cutoff year has no samples).
//! 2. Current = mean NDVI over the trailing 12-month window.
//! 3. Variation = (current − baseline) / baseline × 100; strictly below
//!    −15 % ⇒ non-compliant, otherwise compliant.
//!
//! The classifier is a pure function: no I/O, no retries, no side effects.
//! Every degraded input — empty series, no recent data, zero or non-finite
//! baseline — maps to a `Pending` verdict with an explanatory rationale;
//! classification never returns an error and never panics.

use chrono::Months;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::types::{ComplianceState, ComplianceVerdict, ObservationSeries};

/// Stateless compliance classifier configured at construction.
#[derive(Debug, Clone, Default)]
pub struct ComplianceClassifier {
    config: ClassifierConfig,
}

impl ComplianceClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify one asset's observation series.
    ///
    /// Observations are assumed sorted ascending by date, which
    /// [`ObservationSeries::new`] guarantees.
    pub fn classify(&self, series: &ObservationSeries) -> ComplianceVerdict {
        let Some(latest) = series.latest_date() else {
            return pending("insufficient data: no observations for this asset", 0.0, 0.0);
        };

        let baseline = self.baseline_mean(series);

        // Current window: strictly after (latest − N months). Saturates at
        // the calendar floor rather than failing on pathological dates.
        let window_start = latest
            .checked_sub_months(Months::new(self.config.current_window_months))
            .unwrap_or(chrono::NaiveDate::MIN);
        let window: Vec<f64> = series
            .observations()
            .iter()
            .filter(|obs| obs.date > window_start)
            .map(|obs| obs.ndvi)
            .collect();

        if window.is_empty() {
            return pending(
                "missing recent data: no observations in the trailing window",
                baseline,
                0.0,
            );
        }
        let current = mean(&window);

        // The legacy routine divided blindly here; a zero or non-finite
        // baseline now maps to Pending instead of propagating ±inf/NaN.
        let variation = (current - baseline) / baseline * 100.0;
        if !variation.is_finite() {
            return pending(
                "baseline indeterminate: variation against a zero baseline is undefined",
                baseline,
                current,
            );
        }

        let state = if variation < self.config.degradation_threshold_pct {
            ComplianceState::NonCompliant
        } else {
            ComplianceState::Compliant
        };
        let rationale = format!(
            "NDVI variation {:.1}% vs {} baseline (threshold {:.1}%)",
            variation, self.config.baseline_cutoff_year, self.config.degradation_threshold_pct
        );
        debug!(%state, variation, baseline, current, "classified observation series");

        ComplianceVerdict { state, rationale, baseline, current }
    }

    /// Mean NDVI over the cutoff year, falling back to the first N
    /// observations when that year has no samples.
    fn baseline_mean(&self, series: &ObservationSeries) -> f64 {
        use chrono::Datelike;

        let cutoff_year: Vec<f64> = series
            .observations()
            .iter()
            .filter(|obs| obs.date.year() == self.config.baseline_cutoff_year)
            .map(|obs| obs.ndvi)
            .collect();
        if !cutoff_year.is_empty() {
            return mean(&cutoff_year);
        }

        let head: Vec<f64> = series
            .observations()
            .iter()
            .take(self.config.baseline_fallback_samples)
            .map(|obs| obs.ndvi)
            .collect();
        mean(&head)
    }
}

fn pending(rationale: &str, baseline: f64, current: f64) -> ComplianceVerdict {
    ComplianceVerdict {
        state: ComplianceState::Pending,
        rationale: rationale.to_string(),
        baseline,
        current,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NdviObservation;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, ndvi: f64) -> NdviObservation {
        NdviObservation { date: NaiveDate::from_ymd_opt(y, m, 15).unwrap(), ndvi }
    }

    fn classifier() -> ComplianceClassifier {
        ComplianceClassifier::default()
    }

    #[test]
    fn empty_series_is_pending_with_zeroed_values() {
        let verdict = classifier().classify(&ObservationSeries::default());
        assert_eq!(verdict.state, ComplianceState::Pending);
        assert_eq!(verdict.baseline, 0.0);
        assert_eq!(verdict.current, 0.0);
        assert!(verdict.rationale.contains("insufficient data"));
        assert!(!verdict.certificate_eligible());
    }

    #[test]
    fn baseline_uses_cutoff_year_mean() {
        let series = ObservationSeries::new(vec![
            obs(2020, 3, 0.4),
            obs(2020, 9, 0.6),
            obs(2024, 6, 0.5),
            obs(2024, 12, 0.5),
        ]);
        let verdict = classifier().classify(&series);
        assert!((verdict.baseline - 0.5).abs() < 1e-12);
        assert_eq!(verdict.state, ComplianceState::Compliant);
    }

    #[test]
    fn baseline_falls_back_to_first_six_observations() {
        // Series starts in 2022: no cutoff-year samples at all.
        let mut observations = vec![
            obs(2022, 1, 0.6),
            obs(2022, 2, 0.6),
            obs(2022, 3, 0.6),
            obs(2022, 4, 0.6),
            obs(2022, 5, 0.6),
            obs(2022, 6, 0.6),
            obs(2022, 7, 0.1), // seventh observation must not enter the baseline
        ];
        observations.push(obs(2024, 6, 0.6));
        let verdict = classifier().classify(&ObservationSeries::new(observations));
        assert!((verdict.baseline - 0.6).abs() < 1e-12);
    }

    #[test]
    fn variation_exactly_at_threshold_is_compliant() {
        // Baseline 0.40, current 0.34 ⇒ exactly −15.0%.
        let series = ObservationSeries::new(vec![
            obs(2020, 6, 0.40),
            obs(2024, 8, 0.34),
        ]);
        let verdict = classifier().classify(&series);
        assert_eq!(verdict.state, ComplianceState::Compliant);
        assert!(verdict.rationale.contains("-15.0%"));
    }

    #[test]
    fn forty_percent_drop_is_non_compliant() {
        let mut observations: Vec<NdviObservation> =
            (1..=12).map(|m| obs(2020, m, 0.5)).collect();
        observations.extend((1..=12).map(|m| obs(2024, m, 0.3)));
        let verdict = classifier().classify(&ObservationSeries::new(observations));
        assert_eq!(verdict.state, ComplianceState::NonCompliant);
        assert!(verdict.rationale.contains("-40.0%"), "rationale: {}", verdict.rationale);
        assert!((verdict.baseline - 0.5).abs() < 1e-12);
        assert!((verdict.current - 0.3).abs() < 1e-12);
    }

    #[test]
    fn zero_baseline_is_pending_not_infinite() {
        let series = ObservationSeries::new(vec![
            obs(2020, 6, 0.0),
            obs(2024, 6, 0.4),
        ]);
        let verdict = classifier().classify(&series);
        assert_eq!(verdict.state, ComplianceState::Pending);
        assert!(verdict.rationale.contains("baseline indeterminate"));
        assert!(verdict.current > 0.0);
    }

    #[test]
    fn single_observation_classifies_against_itself() {
        // One 2020 sample is both baseline and trailing window: 0% variation.
        let verdict = classifier().classify(&ObservationSeries::new(vec![obs(2020, 6, 0.5)]));
        assert_eq!(verdict.state, ComplianceState::Compliant);
        assert!(verdict.rationale.contains("0.0%"));
    }
}
