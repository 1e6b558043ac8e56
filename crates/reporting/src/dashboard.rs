//! Dashboard overview — everything the dashboard renders for one filter.

use crate::format::{format_abbreviated, format_date};
use crate::kpi::{kpi_tiles, KpiTile};
use chrono::{DateTime, Utc};
use dashboard_core::{DashboardResult, FilterSelection, MetricsSnapshot, TimeSeriesPoint};
use dashboard_synth::{MetricsSynthesizer, Sampler, SeriesSummary};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub filter: FilterSelection,
    pub snapshot: MetricsSnapshot,
    pub kpis: Vec<KpiTile>,
    pub series: Vec<TimeSeriesPoint>,
    pub summary: SeriesSummary,
    pub generated_at: DateTime<Utc>,
}

/// Recompute the whole overview: one period comparison for the KPI tiles
/// and one series for the chart.
pub fn build_overview<S: Sampler>(
    synth: &mut MetricsSynthesizer<S>,
    filter: &FilterSelection,
) -> DashboardResult<DashboardOverview> {
    let comparison = synth.compare_periods(filter)?;
    let series = synth.generate_series(filter)?;
    let summary = SeriesSummary::from_points(&series);
    let kpis = kpi_tiles(&comparison);

    debug!(filter = %filter, kpis = kpis.len(), points = series.len(), "Built dashboard overview");

    Ok(DashboardOverview {
        filter: filter.clone(),
        snapshot: comparison.current,
        kpis,
        series,
        summary,
        generated_at: Utc::now(),
    })
}

impl DashboardOverview {
    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Performance for {} ({})",
            self.filter,
            format_date(self.generated_at.date_naive())
        );
        for tile in &self.kpis {
            let _ = writeln!(out, "  {:<18} {:>14}  {:>8}", tile.label, tile.display, tile.change_display);
        }
        let _ = writeln!(out);
        for point in &self.series {
            let _ = write!(
                out,
                "  {:<8} {:>8} vs {:>8}",
                point.label,
                format_abbreviated(point.current),
                format_abbreviated(point.previous)
            );
            if let Some(tag) = &point.campaign_tag {
                let _ = write!(out, "  [{tag}]");
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(
            out,
            "  total {} vs {} ({:+.1}%)",
            format_abbreviated(self.summary.total_current),
            format_abbreviated(self.summary.total_previous),
            self.summary.percent_change
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{SynthConfig, TimePeriod};
    use dashboard_synth::{FixedSampler, RngSampler};

    #[test]
    fn test_overview_is_complete() {
        let mut synth = MetricsSynthesizer::new(SynthConfig::default(), RngSampler::seeded(17)).unwrap();
        let filter = FilterSelection::default().with_time_period(TimePeriod::LastWeek);
        let overview = build_overview(&mut synth, &filter).unwrap();

        assert_eq!(overview.filter, filter);
        assert_eq!(overview.kpis.len(), 7);
        assert_eq!(overview.series.len(), 7);
        assert_eq!(overview.summary.point_count, 7);
        assert_eq!(overview.kpis[0].value, overview.snapshot.cost);
    }

    #[test]
    fn test_midpoint_overview_matches_snapshot_oracle() {
        let mut synth = MetricsSynthesizer::new(SynthConfig::default(), FixedSampler::midpoint()).unwrap();
        let overview = build_overview(&mut synth, &FilterSelection::default()).unwrap();

        assert_eq!(overview.snapshot.impressions, 208_333);
        // Identical draws for both periods leave every KPI flat.
        assert!(overview.kpis.iter().all(|t| t.change.percent_change == 0.0));
        assert!(overview.series.iter().all(|p| p.campaign_tag.is_none()));
    }

    #[test]
    fn test_render_text_lists_kpis_and_points() {
        let mut synth = MetricsSynthesizer::new(SynthConfig::default(), FixedSampler::midpoint()).unwrap();
        let text = build_overview(&mut synth, &FilterSelection::default())
            .unwrap()
            .render_text();
        assert!(text.starts_with("Performance for all/all/today"));
        assert!(text.contains("Click-Thru Rate"));
        assert!(text.contains("2.34%"));
        assert!(text.contains("9 AM"));
        assert!(text.contains("7 PM"));
    }

    #[test]
    fn test_overview_serializes_for_charts() {
        let mut synth = MetricsSynthesizer::new(SynthConfig::default(), FixedSampler::midpoint()).unwrap();
        let overview = build_overview(&mut synth, &FilterSelection::default()).unwrap();
        let json = serde_json::to_value(&overview).unwrap();
        assert_eq!(json["filter"]["time_period"], "today");
        assert_eq!(json["series"].as_array().map(Vec::len), Some(6));
        assert!(json["series"][0].get("campaign_tag").is_none());
    }
}
