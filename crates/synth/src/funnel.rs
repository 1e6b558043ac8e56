//! Funnel derivation: impressions -> clicks -> conversions -> cost.

use crate::multipliers::FilterMultipliers;
use crate::sampler::Sampler;
use dashboard_core::{DashboardResult, FilterSelection, MetricsSnapshot, SynthConfig};
use tracing::debug;

/// Derive one funnel snapshot for `filter`.
///
/// Draws four baselines from `sampler` in a fixed order (impressions, CTR,
/// conversion rate, cost per conversion) and scales them with the filter's
/// multipliers. Counts are floored from the stored rates, so every rate field
/// reproduces its count exactly.
pub fn derive_snapshot<S: Sampler + ?Sized>(
    config: &SynthConfig,
    sampler: &mut S,
    filter: &FilterSelection,
) -> DashboardResult<MetricsSnapshot> {
    let multipliers = FilterMultipliers::resolve(config, filter);
    let combined = multipliers.combined();
    let uplift = |multiplier: f64| 1.0 + multiplier * config.engagement_factor;

    let baseline_impressions = sampler.sample_band(config.impressions_band, 0)?;
    let baseline_ctr = sampler.sample_band(config.click_through_band, 2)?;

    let impressions = count(baseline_impressions * combined);
    let click_through_rate = rate(baseline_ctr * uplift(multipliers.region));
    let clicks = count(impressions as f64 * click_through_rate / 100.0);

    let baseline_conversion_rate = sampler.sample_band(config.conversion_rate_band, 2)?;
    let conversion_rate = rate(baseline_conversion_rate * uplift(multipliers.campaign));
    let conversions = count(clicks as f64 * conversion_rate / 100.0);

    let baseline_cost = sampler.sample_band(config.cost_per_conversion_band, 2)?;
    let cost_per_conversion = amount(baseline_cost * uplift(multipliers.region));
    let cost = amount_floor(conversions as f64 * cost_per_conversion);

    let snapshot = MetricsSnapshot {
        impressions,
        clicks,
        conversions,
        cost,
        click_through_rate,
        conversion_rate,
        cost_per_conversion,
    };

    debug!(
        filter = %filter,
        combined_multiplier = combined,
        impressions = snapshot.impressions,
        clicks = snapshot.clicks,
        conversions = snapshot.conversions,
        cost = snapshot.cost,
        "Derived metrics snapshot"
    );

    Ok(snapshot)
}

/// Round to cents.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Non-negative integer count; NaN and negatives collapse to 0.
fn count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Percentage rate rounded to 2 decimals, kept within `[0, 100]` so a
/// derived count can never exceed the stage above it.
fn rate(value: f64) -> f64 {
    round2(amount(value)).min(100.0)
}

fn amount(value: f64) -> f64 {
    if value.is_finite() {
        round2(value.max(0.0))
    } else {
        0.0
    }
}

fn amount_floor(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0).floor()
    } else {
        0.0
    }
}
