//! Synthetic advertising metrics for the dashboard: a filter-sensitive
//! impressions -> clicks -> conversions -> cost funnel, a current vs previous
//! period time series, and period-over-period comparisons.

#![warn(clippy::unwrap_used)]

pub mod catalog;
pub mod comparison;
pub mod engine;
pub mod funnel;
pub mod multipliers;
pub mod sampler;
pub mod series;

pub use comparison::{compare_periods, KpiMetric, MetricChange, SnapshotComparison, Trend};
pub use engine::MetricsSynthesizer;
pub use funnel::derive_snapshot;
pub use multipliers::{combined_multiplier, FilterMultipliers};
pub use sampler::{truncate, FixedSampler, RngSampler, Sampler, ScriptedSampler};
pub use series::{generate_series, SeriesSummary};
