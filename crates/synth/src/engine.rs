//! `MetricsSynthesizer` — validated policy plus an owned sampler.

use crate::comparison::{compare_periods, SnapshotComparison};
use crate::funnel::derive_snapshot;
use crate::multipliers::{combined_multiplier, FilterMultipliers};
use crate::sampler::{RngSampler, Sampler};
use crate::series::generate_series;
use dashboard_core::{
    DashboardResult, FilterSelection, MetricsSnapshot, SynthConfig, TimeSeriesPoint,
};
use tracing::info;

/// Entry point for callers that want one object to hold the policy and the
/// randomness source. Every call is a full recomputation from the filter.
#[derive(Debug, Clone)]
pub struct MetricsSynthesizer<S = RngSampler> {
    config: SynthConfig,
    sampler: S,
}

impl MetricsSynthesizer<RngSampler> {
    /// Build a synthesizer on a real RNG, seeded when `config.seed` is set.
    pub fn from_config(config: SynthConfig) -> DashboardResult<Self> {
        let sampler = match config.seed {
            Some(seed) => {
                info!(seed, "Metrics synthesizer using seeded sampler");
                RngSampler::seeded(seed)
            }
            None => RngSampler::from_entropy(),
        };
        Self::new(config, sampler)
    }
}

impl<S: Sampler> MetricsSynthesizer<S> {
    pub fn new(config: SynthConfig, sampler: S) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self { config, sampler })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }

    pub fn derive_snapshot(&mut self, filter: &FilterSelection) -> DashboardResult<MetricsSnapshot> {
        derive_snapshot(&self.config, &mut self.sampler, filter)
    }

    pub fn generate_series(
        &mut self,
        filter: &FilterSelection,
    ) -> DashboardResult<Vec<TimeSeriesPoint>> {
        generate_series(&self.config, &mut self.sampler, filter)
    }

    pub fn compare_periods(
        &mut self,
        filter: &FilterSelection,
    ) -> DashboardResult<SnapshotComparison> {
        compare_periods(&self.config, &mut self.sampler, filter)
    }

    /// Uniform value in `[min, max]` floor-truncated to `decimals` places.
    pub fn sample(&mut self, min: f64, max: f64, decimals: u32) -> DashboardResult<f64> {
        self.sampler.sample(min, max, decimals)
    }

    pub fn multipliers(&self, filter: &FilterSelection) -> FilterMultipliers {
        FilterMultipliers::resolve(&self.config, filter)
    }

    pub fn combined_multiplier(&self, filter: &FilterSelection) -> f64 {
        combined_multiplier(&self.config, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::FixedSampler;
    use dashboard_core::{Band, DashboardError, TimePeriod};

    #[test]
    fn test_new_rejects_invalid_policy() {
        let config = SynthConfig {
            current_band: Band::new(10.0, 1.0),
            ..Default::default()
        };
        let result = MetricsSynthesizer::new(config, FixedSampler::midpoint());
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_seeded_synthesizers_agree() {
        let config = SynthConfig {
            seed: Some(1234),
            ..Default::default()
        };
        let mut a = MetricsSynthesizer::from_config(config.clone()).unwrap();
        let mut b = MetricsSynthesizer::from_config(config).unwrap();
        let filter = FilterSelection::default().with_time_period(TimePeriod::LastWeek);

        assert_eq!(a.derive_snapshot(&filter).unwrap(), b.derive_snapshot(&filter).unwrap());
        assert_eq!(a.generate_series(&filter).unwrap(), b.generate_series(&filter).unwrap());
    }

    #[test]
    fn test_sample_exposes_range_error() {
        let mut synth = MetricsSynthesizer::new(SynthConfig::default(), FixedSampler::midpoint()).unwrap();
        assert!(synth.sample(5.0, 3.0, 0).is_err());
        assert_eq!(synth.sample(1.0, 2.0, 2).unwrap(), 1.5);
    }

    #[test]
    fn test_combined_multiplier_for_unknown_region() {
        let synth = MetricsSynthesizer::new(SynthConfig::default(), FixedSampler::midpoint()).unwrap();
        let filter = FilterSelection::new("bogus", "search", "last-month");
        assert_eq!(synth.multipliers(&filter).region, 1.0);
        assert!((synth.combined_multiplier(&filter) - 0.8).abs() < 1e-12);
    }
}
