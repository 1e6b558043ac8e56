//! KPI tiles — one formatted card per funnel metric with its period change.

use crate::format::{format_abbreviated, format_count, format_currency, format_percentage};
use dashboard_synth::{KpiMetric, MetricChange, SnapshotComparison};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricFormat {
    Count,
    Abbreviated,
    Currency,
    Percentage,
}

impl MetricFormat {
    pub fn for_metric(metric: KpiMetric) -> Self {
        match metric {
            KpiMetric::Impressions => MetricFormat::Abbreviated,
            KpiMetric::Clicks | KpiMetric::Conversions => MetricFormat::Count,
            KpiMetric::Cost | KpiMetric::CostPerConversion => MetricFormat::Currency,
            KpiMetric::ClickThroughRate | KpiMetric::ConversionRate => MetricFormat::Percentage,
        }
    }

    pub fn render(&self, value: f64) -> String {
        match self {
            MetricFormat::Count => format_count(value.max(0.0) as u64),
            MetricFormat::Abbreviated => format_abbreviated(value),
            MetricFormat::Currency => format_currency(value, 2),
            MetricFormat::Percentage => format_percentage(value, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiTile {
    pub metric: KpiMetric,
    pub label: String,
    pub value: f64,
    pub format: MetricFormat,
    pub display: String,
    /// Signed change, e.g. `+15.2%` or `-3.0%`.
    pub change_display: String,
    pub change: MetricChange,
}

impl KpiTile {
    pub fn from_change(change: &MetricChange) -> Self {
        let format = MetricFormat::for_metric(change.metric);
        Self {
            metric: change.metric,
            label: change.metric.label().to_string(),
            value: change.current,
            format,
            display: format.render(change.current),
            change_display: format!("{:+.1}%", change.percent_change),
            change: change.clone(),
        }
    }
}

/// Tiles in the order the dashboard lays them out.
pub fn kpi_tiles(comparison: &SnapshotComparison) -> Vec<KpiTile> {
    comparison.changes.iter().map(KpiTile::from_change).collect()
}
