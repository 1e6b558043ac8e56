//! Performance-over-time series: one current/previous pair per axis label.

use crate::catalog::{campaigns_for, time_labels};
use crate::comparison::percent_change;
use crate::multipliers::combined_multiplier;
use crate::sampler::Sampler;
use dashboard_core::{DashboardResult, FilterSelection, SynthConfig, TimeSeriesPoint};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// Generate the full series for `filter`, one point per period label.
///
/// Each point draws `current`, then `previous`, then the tag coin flip, and
/// the campaign pick when the flip lands. The series is always regenerated
/// whole; nothing carries over between calls.
pub fn generate_series<S: Sampler + ?Sized>(
    config: &SynthConfig,
    sampler: &mut S,
    filter: &FilterSelection,
) -> DashboardResult<Vec<TimeSeriesPoint>> {
    let labels = time_labels(&filter.time_period);
    let campaigns = campaigns_for(&filter.region);
    let multiplier = combined_multiplier(config, filter);
    let current_band = config.current_band.scaled(multiplier);
    let previous_band = config.previous_band.scaled(multiplier);

    let mut points = Vec::with_capacity(labels.len());
    for label in labels {
        let current = sampler.sample_band(current_band, 0)?.max(0.0);
        let previous = sampler.sample_band(previous_band, 0)?.max(0.0);
        let campaign_tag = if sampler.chance(config.campaign_tag_probability) {
            sampler
                .pick_index(campaigns.len())
                .map(|i| campaigns[i].to_string())
        } else {
            None
        };
        points.push(TimeSeriesPoint {
            label: label.to_string(),
            current,
            previous,
            campaign_tag,
        });
    }

    keep_tags_sparse(&mut points);

    debug!(
        filter = %filter,
        points = points.len(),
        tagged = points.iter().filter(|p| p.campaign_tag.is_some()).count(),
        "Generated time series"
    );

    Ok(points)
}

/// Annotations are for highlighting a few points; a fully tagged chart
/// loses its last tag.
fn keep_tags_sparse(points: &mut [TimeSeriesPoint]) {
    if points.len() > 1 && points.iter().all(|p| p.campaign_tag.is_some()) {
        if let Some(last) = points.last_mut() {
            last.campaign_tag = None;
        }
    }
}

/// Totals and highlights of a generated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesSummary {
    pub point_count: usize,
    pub total_current: f64,
    pub total_previous: f64,
    /// Percent change of the current total over the previous total.
    pub percent_change: f64,
    /// Label of the point with the highest current value.
    pub peak_label: Option<String>,
    /// Distinct campaign tags in order of first appearance.
    pub campaigns: Vec<String>,
}

impl SeriesSummary {
    pub fn from_points(points: &[TimeSeriesPoint]) -> Self {
        let total_current: f64 = points.iter().map(|p| p.current).sum();
        let total_previous: f64 = points.iter().map(|p| p.previous).sum();

        let peak_label = points
            .iter()
            .max_by(|a, b| a.current.total_cmp(&b.current))
            .map(|p| p.label.clone());

        let mut campaigns: Vec<String> = Vec::new();
        for tag in points.iter().filter_map(|p| p.campaign_tag.as_ref()) {
            if !campaigns.contains(tag) {
                campaigns.push(tag.clone());
            }
        }

        Self {
            point_count: points.len(),
            total_current,
            total_previous,
            percent_change: percent_change(total_current, total_previous),
            peak_label,
            campaigns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::campaigns_for;
    use crate::sampler::{FixedSampler, RngSampler, ScriptedSampler};
    use dashboard_core::{CampaignType, Region, TimePeriod};

    fn point(label: &str, current: f64, previous: f64, tag: Option<&str>) -> TimeSeriesPoint {
        TimeSeriesPoint {
            label: label.to_string(),
            current,
            previous,
            campaign_tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_series_length_matches_period_labels() {
        let config = SynthConfig::default();
        let mut sampler = RngSampler::seeded(11);
        let expected = [
            (TimePeriod::Today, 6),
            (TimePeriod::Yesterday, 6),
            (TimePeriod::LastWeek, 7),
            (TimePeriod::LastMonth, 4),
            (TimePeriod::LastQuarter, 4),
            (TimePeriod::parse("someday"), 6),
        ];
        for (period, len) in expected {
            let filter = FilterSelection::default().with_time_period(period);
            let points = generate_series(&config, &mut sampler, &filter).unwrap();
            assert_eq!(points.len(), len, "period {}", filter.time_period);
        }
    }

    #[test]
    fn test_labels_follow_period_table() {
        let config = SynthConfig::default();
        let filter = FilterSelection::default().with_time_period(TimePeriod::LastWeek);
        let points = generate_series(&config, &mut FixedSampler::midpoint(), &filter).unwrap();
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_midpoint_values_scale_with_multiplier() {
        let config = SynthConfig::default();
        let filter = FilterSelection::new(Region::Northeast, CampaignType::Display, TimePeriod::LastMonth);
        let points = generate_series(&config, &mut FixedSampler::midpoint(), &filter).unwrap();

        // combined 0.8 * 0.5 * 1.0 = 0.4: current [200, 600], previous [160, 640]
        for p in &points {
            assert_eq!(p.current, 400.0);
            assert_eq!(p.previous, 400.0);
            // 0.5 is above the 0.3 tag probability
            assert!(p.campaign_tag.is_none());
        }
    }

    #[test]
    fn test_values_stay_within_scaled_bands() {
        let config = SynthConfig::default();
        let filter = FilterSelection::new(Region::West, CampaignType::Search, TimePeriod::LastQuarter);
        let m = combined_multiplier(&config, &filter);
        let mut sampler = RngSampler::seeded(5);
        for _ in 0..50 {
            for p in generate_series(&config, &mut sampler, &filter).unwrap() {
                assert!(p.current >= (500.0 * m).floor() && p.current <= 1500.0 * m);
                assert!(p.previous >= (400.0 * m).floor() && p.previous <= 1600.0 * m);
            }
        }
    }

    #[test]
    fn test_tags_come_from_region_catalog() {
        let config = SynthConfig::default();
        let filter = FilterSelection::new(Region::South, CampaignType::All, TimePeriod::LastWeek);
        let catalog = campaigns_for(&Region::South);
        let mut sampler = RngSampler::seeded(3);
        let mut seen = 0;
        for _ in 0..100 {
            for p in generate_series(&config, &mut sampler, &filter).unwrap() {
                if let Some(tag) = p.campaign_tag {
                    assert!(catalog.contains(&tag.as_str()));
                    seen += 1;
                }
            }
        }
        // 700 points at p = 0.3
        assert!(seen > 150 && seen < 280, "saw {seen} tags");
    }

    #[test]
    fn test_tags_are_never_on_every_point() {
        let config = SynthConfig {
            campaign_tag_probability: 1.0,
            ..Default::default()
        };
        let points = generate_series(&config, &mut FixedSampler(0.1), &FilterSelection::default())
            .unwrap();
        let tagged = points.iter().filter(|p| p.campaign_tag.is_some()).count();
        assert_eq!(tagged, points.len() - 1);
        assert!(points.last().map_or(false, |p| p.campaign_tag.is_none()));
    }

    #[test]
    fn test_draw_order_per_point() {
        // current, previous, tag flip (0.0 < 0.3 lands), campaign pick
        let mut sampler = ScriptedSampler::new(vec![0.0, 1.0, 0.0, 0.0]);
        let filter = FilterSelection::new(Region::West, CampaignType::All, TimePeriod::LastMonth);
        let config = SynthConfig::default();
        let points = generate_series(&config, &mut sampler, &filter).unwrap();
        let m = combined_multiplier(&config, &filter);

        assert_eq!(points[0].current, (500.0 * m).floor());
        assert_eq!(points[0].previous, (1600.0 * m).floor());
        assert_eq!(points[0].campaign_tag.as_deref(), Some("CA Performance Max"));
        assert_eq!(sampler.draws_taken(), 4 * points.len());
    }

    #[test]
    fn test_summary_totals_and_peak() {
        let points = vec![
            point("Mon", 100.0, 80.0, None),
            point("Tue", 300.0, 120.0, Some("TX Search Premier")),
            point("Wed", 200.0, 200.0, Some("TX Search Premier")),
            point("Thu", 50.0, 0.0, Some("FL Performance Max")),
        ];
        let summary = SeriesSummary::from_points(&points);
        assert_eq!(summary.point_count, 4);
        assert_eq!(summary.total_current, 650.0);
        assert_eq!(summary.total_previous, 400.0);
        assert_eq!(summary.percent_change, 62.5);
        assert_eq!(summary.peak_label.as_deref(), Some("Tue"));
        assert_eq!(summary.campaigns, vec!["TX Search Premier", "FL Performance Max"]);
    }

    #[test]
    fn test_summary_of_empty_series() {
        let summary = SeriesSummary::from_points(&[]);
        assert_eq!(summary.point_count, 0);
        assert_eq!(summary.percent_change, 0.0);
        assert!(summary.peak_label.is_none());
    }
}
