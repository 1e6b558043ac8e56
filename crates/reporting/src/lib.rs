//! Dashboard presentation — number formatting, KPI tiles, and the
//! assembled overview the dashboard renders for one filter selection.

pub mod dashboard;
pub mod format;
pub mod kpi;

pub use dashboard::{build_overview, DashboardOverview};
pub use format::{
    format_abbreviated, format_count, format_currency, format_date, format_percentage,
};
pub use kpi::{kpi_tiles, KpiTile, MetricFormat};
