use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Geographic bucket the dashboard can be filtered by.
///
/// Unrecognized values are kept verbatim in `Other` so the engine can fall
/// back to neutral multipliers instead of rejecting the filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    #[default]
    All,
    Northeast,
    Midwest,
    South,
    West,
    Other(String),
}

impl Region {
    pub const KNOWN: [Region; 5] = [
        Region::All,
        Region::Northeast,
        Region::Midwest,
        Region::South,
        Region::West,
    ];

    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" | "" => Region::All,
            "northeast" => Region::Northeast,
            "midwest" => Region::Midwest,
            "south" => Region::South,
            "west" => Region::West,
            _ => Region::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Region::All => "all",
            Region::Northeast => "northeast",
            Region::Midwest => "midwest",
            Region::South => "south",
            Region::West => "west",
            Region::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Region::Other(_))
    }
}

/// Advertising campaign family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignType {
    #[default]
    All,
    Search,
    Performance,
    Display,
    Other(String),
}

impl CampaignType {
    pub const KNOWN: [CampaignType; 4] = [
        CampaignType::All,
        CampaignType::Search,
        CampaignType::Performance,
        CampaignType::Display,
    ];

    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" | "" => CampaignType::All,
            "search" => CampaignType::Search,
            "performance" | "performance-max" | "pmax" => CampaignType::Performance,
            "display" => CampaignType::Display,
            _ => CampaignType::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CampaignType::All => "all",
            CampaignType::Search => "search",
            CampaignType::Performance => "performance",
            CampaignType::Display => "display",
            CampaignType::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, CampaignType::Other(_))
    }
}

/// Reporting window. Each period has its own duration multiplier and
/// its own set of chart axis labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimePeriod {
    #[default]
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    LastQuarter,
    Other(String),
}

impl TimePeriod {
    pub const KNOWN: [TimePeriod; 5] = [
        TimePeriod::Today,
        TimePeriod::Yesterday,
        TimePeriod::LastWeek,
        TimePeriod::LastMonth,
        TimePeriod::LastQuarter,
    ];

    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "today" | "" => TimePeriod::Today,
            "yesterday" => TimePeriod::Yesterday,
            "last-week" | "week" => TimePeriod::LastWeek,
            "last-month" | "month" => TimePeriod::LastMonth,
            "last-quarter" | "quarter" => TimePeriod::LastQuarter,
            _ => TimePeriod::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimePeriod::Today => "today",
            TimePeriod::Yesterday => "yesterday",
            TimePeriod::LastWeek => "last-week",
            TimePeriod::LastMonth => "last-month",
            TimePeriod::LastQuarter => "last-quarter",
            TimePeriod::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TimePeriod::Other(_))
    }
}

macro_rules! string_conversions {
    ($($ty:ident),*) => {
        $(
            impl From<String> for $ty {
                fn from(raw: String) -> Self {
                    $ty::parse(&raw)
                }
            }

            impl From<&str> for $ty {
                fn from(raw: &str) -> Self {
                    $ty::parse(raw)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.as_str().to_string()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

string_conversions!(Region, CampaignType, TimePeriod);

/// The active query context driving every synthesized metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub struct FilterSelection {
    #[serde(default)]
    #[schema(value_type = String, example = "all")]
    pub region: Region,
    #[serde(default)]
    #[schema(value_type = String, example = "all")]
    pub campaign_type: CampaignType,
    #[serde(default)]
    #[schema(value_type = String, example = "today")]
    pub time_period: TimePeriod,
}

impl FilterSelection {
    pub fn new(
        region: impl Into<Region>,
        campaign_type: impl Into<CampaignType>,
        time_period: impl Into<TimePeriod>,
    ) -> Self {
        Self {
            region: region.into(),
            campaign_type: campaign_type.into(),
            time_period: time_period.into(),
        }
    }

    pub fn with_time_period(&self, time_period: TimePeriod) -> Self {
        Self {
            time_period,
            ..self.clone()
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.region, self.campaign_type, self.time_period
        )
    }
}

/// Inclusive `[min, max]` sampling range before any multiplier is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    pub fn midpoint(self) -> f64 {
        self.min + (self.max - self.min) / 2.0
    }
}

/// Funnel result for one filter selection.
///
/// Counts are integers; the three rate fields are the rounded values the
/// counts were derived from, so `clicks == floor(impressions * ctr / 100)`
/// and `cost == floor(conversions * cost_per_conversion)` hold exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSnapshot {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub cost: f64,
    /// Percent, e.g. `2.34` means 2.34%.
    pub click_through_rate: f64,
    /// Percent of clicks that converted.
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
}

impl MetricsSnapshot {
    /// CTR recomputed from the integer counts; 0 when there are no impressions.
    pub fn observed_click_through_rate(&self) -> f64 {
        percent_of(self.clicks as f64, self.impressions as f64)
    }

    /// Conversion rate recomputed from the integer counts; 0 when there are no clicks.
    pub fn observed_conversion_rate(&self) -> f64 {
        percent_of(self.conversions as f64, self.clicks as f64)
    }

    /// Spend per conversion recomputed from cost; 0 when nothing converted.
    pub fn observed_cost_per_conversion(&self) -> f64 {
        ratio(self.cost, self.conversions as f64)
    }
}

/// One point on the performance-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeSeriesPoint {
    pub label: String,
    pub current: f64,
    pub previous: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_tag: Option<String>,
}

/// `numerator / denominator`, short-circuiting to 0 instead of NaN or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// `numerator / denominator * 100` with the same zero guard as [`ratio`].
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}
