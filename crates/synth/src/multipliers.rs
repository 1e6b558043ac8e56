//! Filter multiplier lookups.

use dashboard_core::{FilterSelection, SynthConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Neutral multiplier used for any key a table does not know.
pub const FALLBACK_MULTIPLIER: f64 = 1.0;

/// The three per-dimension multipliers resolved for one filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterMultipliers {
    pub region: f64,
    pub campaign: f64,
    pub period: f64,
}

impl FilterMultipliers {
    pub fn resolve(config: &SynthConfig, filter: &FilterSelection) -> Self {
        Self {
            region: lookup(&config.region_multipliers, filter.region.as_str(), "region"),
            campaign: lookup(
                &config.campaign_multipliers,
                filter.campaign_type.as_str(),
                "campaign_type",
            ),
            period: lookup(
                &config.period_multipliers,
                filter.time_period.as_str(),
                "time_period",
            ),
        }
    }

    pub fn combined(&self) -> f64 {
        self.region * self.campaign * self.period
    }
}

/// `region × campaign × period` for the given filter.
pub fn combined_multiplier(config: &SynthConfig, filter: &FilterSelection) -> f64 {
    FilterMultipliers::resolve(config, filter).combined()
}

fn lookup(table: &BTreeMap<String, f64>, key: &str, dimension: &str) -> f64 {
    let found = table
        .get(key)
        .or_else(|| table.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v));
    match found {
        Some(value) => *value,
        None => {
            warn!(dimension, key, "Unrecognized filter value, using neutral multiplier");
            FALLBACK_MULTIPLIER
        }
    }
}
