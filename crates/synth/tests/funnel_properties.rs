//! Funnel and series invariants over arbitrary sampler draws and filters.

use dashboard_core::{FilterSelection, SynthConfig};
use dashboard_synth::catalog::time_labels;
use dashboard_synth::{derive_snapshot, generate_series, ScriptedSampler};
use proptest::prelude::*;

fn filter_strategy() -> impl Strategy<Value = FilterSelection> {
    let regions = prop::sample::select(vec!["all", "northeast", "midwest", "south", "west", "bogus"]);
    let campaigns = prop::sample::select(vec!["all", "search", "performance", "display", "radio"]);
    let periods = prop::sample::select(vec![
        "today",
        "yesterday",
        "last-week",
        "last-month",
        "last-quarter",
        "fortnight",
    ]);
    (regions, campaigns, periods).prop_map(|(r, c, p)| FilterSelection::new(r, c, p))
}

fn draws_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![Just(0.0), Just(1.0), 0.0f64..1.0],
        1..32,
    )
}

proptest! {
    #[test]
    fn funnel_is_ordered_and_non_negative(filter in filter_strategy(), draws in draws_strategy()) {
        let mut sampler = ScriptedSampler::new(draws);
        let s = derive_snapshot(&SynthConfig::default(), &mut sampler, &filter).unwrap();

        prop_assert!(s.conversions <= s.clicks);
        prop_assert!(s.clicks <= s.impressions);
        prop_assert!(s.cost >= 0.0);
        prop_assert!(s.click_through_rate >= 0.0);
        prop_assert!(s.conversion_rate >= 0.0);
        prop_assert!(s.cost_per_conversion >= 0.0);
    }

    #[test]
    fn counts_are_reconstructable_from_rates(filter in filter_strategy(), draws in draws_strategy()) {
        let mut sampler = ScriptedSampler::new(draws);
        let s = derive_snapshot(&SynthConfig::default(), &mut sampler, &filter).unwrap();

        prop_assert_eq!(s.clicks, (s.impressions as f64 * s.click_through_rate / 100.0).floor() as u64);
        prop_assert_eq!(s.conversions, (s.clicks as f64 * s.conversion_rate / 100.0).floor() as u64);
        prop_assert_eq!(s.cost, (s.conversions as f64 * s.cost_per_conversion).floor());
    }

    #[test]
    fn observed_rates_track_stored_rates(filter in filter_strategy(), draws in draws_strategy()) {
        let mut sampler = ScriptedSampler::new(draws);
        let s = derive_snapshot(&SynthConfig::default(), &mut sampler, &filter).unwrap();

        // Flooring drops less than one whole click.
        if s.impressions > 0 {
            let gap = s.click_through_rate - s.observed_click_through_rate();
            prop_assert!((-1e-9..=100.0 / s.impressions as f64 + 1e-9).contains(&gap));
        }
        prop_assert!(s.observed_conversion_rate().is_finite());
        prop_assert!(s.observed_cost_per_conversion().is_finite());
    }

    #[test]
    fn series_length_follows_label_table(filter in filter_strategy(), draws in draws_strategy()) {
        let mut sampler = ScriptedSampler::new(draws);
        let points = generate_series(&SynthConfig::default(), &mut sampler, &filter).unwrap();

        prop_assert_eq!(points.len(), time_labels(&filter.time_period).len());
        prop_assert!(points.iter().all(|p| p.current >= 0.0 && p.previous >= 0.0));
        prop_assert!(points.iter().any(|p| p.campaign_tag.is_none()));
    }
}
