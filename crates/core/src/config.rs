use crate::error::{DashboardError, DashboardResult};
use crate::types::Band;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `DASHBOARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub synth: SynthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Policy constants for metrics synthesis.
///
/// None of these values encode real benchmarks; they are reference defaults
/// tuned for a plausible-looking demo dashboard and may be overridden freely.
#[derive(Debug, Clone, Deserialize)]
pub struct SynthConfig {
    #[serde(default = "default_impressions_band")]
    pub impressions_band: Band,
    /// Baseline click-through rate in percent.
    #[serde(default = "default_click_through_band")]
    pub click_through_band: Band,
    /// Baseline conversion rate in percent.
    #[serde(default = "default_conversion_rate_band")]
    pub conversion_rate_band: Band,
    #[serde(default = "default_cost_per_conversion_band")]
    pub cost_per_conversion_band: Band,
    /// Per-point band for the current period series, before scaling.
    #[serde(default = "default_current_band")]
    pub current_band: Band,
    /// Per-point band for the previous period series, before scaling.
    #[serde(default = "default_previous_band")]
    pub previous_band: Band,
    /// Rate uplift per unit of multiplier: `rate * (1 + multiplier * factor)`.
    #[serde(default = "default_engagement_factor")]
    pub engagement_factor: f64,
    #[serde(default = "default_campaign_tag_probability")]
    pub campaign_tag_probability: f64,
    #[serde(default = "default_region_multipliers")]
    pub region_multipliers: BTreeMap<String, f64>,
    #[serde(default = "default_campaign_multipliers")]
    pub campaign_multipliers: BTreeMap<String, f64>,
    #[serde(default = "default_period_multipliers")]
    pub period_multipliers: BTreeMap<String, f64>,
    /// Fixed seed for a reproducible sampler; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default functions
fn default_node_id() -> String {
    "dashboard-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_impressions_band() -> Band {
    Band::new(1_200_000.0, 1_300_000.0)
}
fn default_click_through_band() -> Band {
    Band::new(1.80, 1.95)
}
fn default_conversion_rate_band() -> Band {
    Band::new(1.70, 1.99)
}
fn default_cost_per_conversion_band() -> Band {
    Band::new(33.0, 36.0)
}
fn default_current_band() -> Band {
    Band::new(500.0, 1500.0)
}
fn default_previous_band() -> Band {
    Band::new(400.0, 1600.0)
}
fn default_engagement_factor() -> f64 {
    0.1
}
fn default_campaign_tag_probability() -> f64 {
    0.3
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

fn default_region_multipliers() -> BTreeMap<String, f64> {
    // "all" aggregates every region, hence larger than any single one.
    table(&[
        ("all", 2.5),
        ("northeast", 0.8),
        ("midwest", 0.6),
        ("south", 0.7),
        ("west", 0.9),
    ])
}

fn default_campaign_multipliers() -> BTreeMap<String, f64> {
    table(&[
        ("all", 2.0),
        ("search", 0.8),
        ("performance", 0.7),
        ("display", 0.5),
    ])
}

fn default_period_multipliers() -> BTreeMap<String, f64> {
    // Fractions of a 30-day month.
    table(&[
        ("today", 1.0 / 30.0),
        ("yesterday", 0.95 / 30.0),
        ("last-week", 7.0 / 30.0),
        ("last-month", 1.0),
        ("last-quarter", 3.0),
    ])
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            impressions_band: default_impressions_band(),
            click_through_band: default_click_through_band(),
            conversion_rate_band: default_conversion_rate_band(),
            cost_per_conversion_band: default_cost_per_conversion_band(),
            current_band: default_current_band(),
            previous_band: default_previous_band(),
            engagement_factor: default_engagement_factor(),
            campaign_tag_probability: default_campaign_tag_probability(),
            region_multipliers: default_region_multipliers(),
            campaign_multipliers: default_campaign_multipliers(),
            period_multipliers: default_period_multipliers(),
            seed: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            synth: SynthConfig::default(),
        }
    }
}

impl SynthConfig {
    /// Reject policies the engine cannot honor.
    pub fn validate(&self) -> DashboardResult<()> {
        let bands = [
            ("impressions_band", self.impressions_band),
            ("click_through_band", self.click_through_band),
            ("conversion_rate_band", self.conversion_rate_band),
            ("cost_per_conversion_band", self.cost_per_conversion_band),
            ("current_band", self.current_band),
            ("previous_band", self.previous_band),
        ];
        for (name, band) in bands {
            if !band.min.is_finite() || !band.max.is_finite() {
                return Err(DashboardError::Config(format!("{name} must be finite")));
            }
            if band.min < 0.0 {
                return Err(DashboardError::Config(format!(
                    "{name} must not be negative (min {})",
                    band.min
                )));
            }
            if band.min > band.max {
                return Err(DashboardError::Config(format!(
                    "{name} has min {} greater than max {}",
                    band.min, band.max
                )));
            }
        }

        if !self.engagement_factor.is_finite() || self.engagement_factor < 0.0 {
            return Err(DashboardError::Config(
                "engagement_factor must be a non-negative number".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.campaign_tag_probability) {
            return Err(DashboardError::Config(format!(
                "campaign_tag_probability {} is outside [0, 1]",
                self.campaign_tag_probability
            )));
        }

        let tables = [
            ("region_multipliers", &self.region_multipliers),
            ("campaign_multipliers", &self.campaign_multipliers),
            ("period_multipliers", &self.period_multipliers),
        ];
        for (name, table) in tables {
            if let Some((key, value)) = table.iter().find(|(_, v)| !(v.is_finite() && **v > 0.0)) {
                return Err(DashboardError::Config(format!(
                    "{name}.{key} must be a positive multiplier, got {value}"
                )));
            }
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
