pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, SynthConfig};
pub use error::{DashboardError, DashboardResult};
pub use types::{
    Band, CampaignType, FilterSelection, MetricsSnapshot, Region, TimePeriod, TimeSeriesPoint,
};
