//! Period-over-period comparison for the KPI cards.

use crate::funnel::derive_snapshot;
use crate::sampler::Sampler;
use dashboard_core::{DashboardResult, FilterSelection, MetricsSnapshot, SynthConfig};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum KpiMetric {
    Impressions,
    Clicks,
    Conversions,
    Cost,
    ClickThroughRate,
    ConversionRate,
    CostPerConversion,
}

impl KpiMetric {
    pub const ALL: [KpiMetric; 7] = [
        KpiMetric::Cost,
        KpiMetric::Conversions,
        KpiMetric::Clicks,
        KpiMetric::Impressions,
        KpiMetric::ConversionRate,
        KpiMetric::ClickThroughRate,
        KpiMetric::CostPerConversion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KpiMetric::Impressions => "Impressions",
            KpiMetric::Clicks => "Clicks",
            KpiMetric::Conversions => "Conversions",
            KpiMetric::Cost => "Cost",
            KpiMetric::ClickThroughRate => "Click-Thru Rate",
            KpiMetric::ConversionRate => "Conversion Rate",
            KpiMetric::CostPerConversion => "Cost / Conversion",
        }
    }

    pub fn value(&self, snapshot: &MetricsSnapshot) -> f64 {
        match self {
            KpiMetric::Impressions => snapshot.impressions as f64,
            KpiMetric::Clicks => snapshot.clicks as f64,
            KpiMetric::Conversions => snapshot.conversions as f64,
            KpiMetric::Cost => snapshot.cost,
            KpiMetric::ClickThroughRate => snapshot.click_through_rate,
            KpiMetric::ConversionRate => snapshot.conversion_rate,
            KpiMetric::CostPerConversion => snapshot.cost_per_conversion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricChange {
    pub metric: KpiMetric,
    pub current: f64,
    pub previous: f64,
    /// Rounded to one decimal; 0 when the previous value is 0.
    pub percent_change: f64,
    pub trend: Trend,
}

impl MetricChange {
    pub fn between(metric: KpiMetric, current: f64, previous: f64) -> Self {
        let percent_change = percent_change(current, previous);
        let trend = if percent_change > 0.0 {
            Trend::Up
        } else if percent_change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        };
        Self {
            metric,
            current,
            previous,
            percent_change,
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotComparison {
    pub filter: FilterSelection,
    pub current: MetricsSnapshot,
    pub previous: MetricsSnapshot,
    pub changes: Vec<MetricChange>,
}

impl SnapshotComparison {
    pub fn from_snapshots(
        filter: FilterSelection,
        current: MetricsSnapshot,
        previous: MetricsSnapshot,
    ) -> Self {
        let changes = KpiMetric::ALL
            .iter()
            .map(|metric| MetricChange::between(*metric, metric.value(&current), metric.value(&previous)))
            .collect();
        Self {
            filter,
            current,
            previous,
            changes,
        }
    }

    pub fn change(&self, metric: KpiMetric) -> Option<&MetricChange> {
        self.changes.iter().find(|c| c.metric == metric)
    }
}

/// Derive the current period and a comparable previous period for the same
/// filter. The two snapshots are independent draws.
pub fn compare_periods<S: Sampler + ?Sized>(
    config: &SynthConfig,
    sampler: &mut S,
    filter: &FilterSelection,
) -> DashboardResult<SnapshotComparison> {
    let current = derive_snapshot(config, sampler, filter)?;
    let previous = derive_snapshot(config, sampler, filter)?;
    Ok(SnapshotComparison::from_snapshots(filter.clone(), current, previous))
}

/// `(current - previous) / previous * 100`, one decimal, 0 without a baseline.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return 0.0;
    }
    ((current - previous) / previous * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{RngSampler, ScriptedSampler};

    #[test]
    fn test_percent_change_rounds_to_one_decimal() {
        assert_eq!(percent_change(155.0, 100.0), 55.0);
        assert_eq!(percent_change(1.0, 3.0), -66.7);
        assert_eq!(percent_change(10.0, 10.0), 0.0);
    }

    #[test]
    fn test_percent_change_without_baseline_is_zero() {
        assert_eq!(percent_change(42.0, 0.0), 0.0);
        assert_eq!(percent_change(f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_trend_direction() {
        assert_eq!(MetricChange::between(KpiMetric::Clicks, 120.0, 100.0).trend, Trend::Up);
        assert_eq!(MetricChange::between(KpiMetric::Cost, 80.0, 100.0).trend, Trend::Down);
        assert_eq!(MetricChange::between(KpiMetric::Cost, 0.0, 0.0).trend, Trend::Flat);
    }

    #[test]
    fn test_comparison_covers_every_kpi() {
        let config = SynthConfig::default();
        let comparison =
            compare_periods(&config, &mut RngSampler::seeded(8), &FilterSelection::default()).unwrap();
        assert_eq!(comparison.changes.len(), KpiMetric::ALL.len());
        let clicks = comparison.change(KpiMetric::Clicks).unwrap();
        assert_eq!(clicks.current, comparison.current.clicks as f64);
        assert_eq!(clicks.previous, comparison.previous.clicks as f64);
    }

    #[test]
    fn test_previous_period_is_an_independent_draw() {
        // First snapshot draws the band minimums, second the maximums.
        let mut sampler = ScriptedSampler::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        let comparison =
            compare_periods(&SynthConfig::default(), &mut sampler, &FilterSelection::default()).unwrap();
        assert!(comparison.current.impressions < comparison.previous.impressions);
        assert_eq!(comparison.change(KpiMetric::Impressions).unwrap().trend, Trend::Down);
        assert_eq!(sampler.draws_taken(), 8);
    }
}
