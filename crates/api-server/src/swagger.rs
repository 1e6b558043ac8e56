//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketing Dashboard Metrics API",
        version = "0.1.0",
        description = "Synthetic Google Ads style funnel metrics and performance-over-time series for the marketing dashboard.\n\nEvery response is recomputed from the region, campaign type, and time period filter.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Metrics", description = "Funnel snapshots, time series, comparisons, and dashboard overview"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Metrics
        crate::metrics_rest::handle_snapshot,
        crate::metrics_rest::handle_series,
        crate::metrics_rest::handle_comparison,
        crate::metrics_rest::handle_dashboard,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Domain types
        dashboard_core::FilterSelection,
        dashboard_core::MetricsSnapshot,
        dashboard_core::TimeSeriesPoint,
        dashboard_synth::SeriesSummary,
        dashboard_synth::SnapshotComparison,
        dashboard_synth::MetricChange,
        dashboard_synth::KpiMetric,
        dashboard_synth::Trend,
        dashboard_reporting::DashboardOverview,
        dashboard_reporting::KpiTile,
        dashboard_reporting::MetricFormat,
        // REST response types
        crate::metrics_rest::SeriesResponse,
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
