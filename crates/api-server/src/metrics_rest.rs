//! Synthesized metrics endpoints. Every request recomputes from its filter.

use crate::rest::{AppState, ErrorResponse};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use dashboard_core::{DashboardError, FilterSelection, MetricsSnapshot, TimeSeriesPoint};
use dashboard_reporting::{build_overview, DashboardOverview};
use dashboard_synth::{SeriesSummary, SnapshotComparison};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Filter query string. Missing values default to all/all/today and
/// unrecognized values fall back to neutral multipliers.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// all, northeast, midwest, south, west
    pub region: Option<String>,
    /// all, search, performance, display
    pub campaign_type: Option<String>,
    /// today, yesterday, last-week, last-month, last-quarter
    pub time_period: Option<String>,
}

impl From<FilterQuery> for FilterSelection {
    fn from(query: FilterQuery) -> Self {
        FilterSelection::new(
            query.region.unwrap_or_default(),
            query.campaign_type.unwrap_or_default(),
            query.time_period.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesResponse {
    pub filter: FilterSelection,
    pub points: Vec<TimeSeriesPoint>,
    pub summary: SeriesSummary,
}

fn engine_failure(
    operation: &'static str,
    filter: &FilterSelection,
    e: DashboardError,
) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %e, filter = %filter, operation, "Metrics synthesis failed");
    metrics::counter!("api.errors", "operation" => operation).increment(1);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "synthesis_failed".to_string(),
            message: e.to_string(),
        }),
    )
}

/// GET /v1/metrics/snapshot — Funnel snapshot for a filter.
#[utoipa::path(
    get,
    path = "/v1/metrics/snapshot",
    tag = "Metrics",
    params(FilterQuery),
    responses(
        (status = 200, description = "Funnel snapshot", body = MetricsSnapshot),
        (status = 500, description = "Synthesis failed", body = ErrorResponse),
    )
)]
pub async fn handle_snapshot(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<MetricsSnapshot> {
    let filter = FilterSelection::from(query);
    let snapshot = state
        .synth
        .lock()
        .derive_snapshot(&filter)
        .map_err(|e| engine_failure("snapshot", &filter, e))?;
    metrics::counter!("api.snapshots").increment(1);
    Ok(Json(snapshot))
}

/// GET /v1/metrics/series — Current vs previous period series for a filter.
#[utoipa::path(
    get,
    path = "/v1/metrics/series",
    tag = "Metrics",
    params(FilterQuery),
    responses(
        (status = 200, description = "Time series with summary", body = SeriesResponse),
        (status = 500, description = "Synthesis failed", body = ErrorResponse),
    )
)]
pub async fn handle_series(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<SeriesResponse> {
    let filter = FilterSelection::from(query);
    let points = state
        .synth
        .lock()
        .generate_series(&filter)
        .map_err(|e| engine_failure("series", &filter, e))?;
    metrics::counter!("api.series").increment(1);
    let summary = SeriesSummary::from_points(&points);
    Ok(Json(SeriesResponse {
        filter,
        points,
        summary,
    }))
}

/// GET /v1/metrics/comparison — Current vs previous period KPI changes.
#[utoipa::path(
    get,
    path = "/v1/metrics/comparison",
    tag = "Metrics",
    params(FilterQuery),
    responses(
        (status = 200, description = "Period-over-period comparison", body = SnapshotComparison),
        (status = 500, description = "Synthesis failed", body = ErrorResponse),
    )
)]
pub async fn handle_comparison(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<SnapshotComparison> {
    let filter = FilterSelection::from(query);
    let comparison = state
        .synth
        .lock()
        .compare_periods(&filter)
        .map_err(|e| engine_failure("comparison", &filter, e))?;
    metrics::counter!("api.comparisons").increment(1);
    Ok(Json(comparison))
}

/// GET /v1/dashboard — KPI tiles, chart series, and summary in one payload.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    tag = "Metrics",
    params(FilterQuery),
    responses(
        (status = 200, description = "Dashboard overview", body = DashboardOverview),
        (status = 500, description = "Synthesis failed", body = ErrorResponse),
    )
)]
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<DashboardOverview> {
    let filter = FilterSelection::from(query);
    let mut synth = state.synth.lock();
    let built = build_overview(&mut *synth, &filter);
    drop(synth);
    let overview = built.map_err(|e| engine_failure("dashboard", &filter, e))?;
    metrics::counter!("api.overview").increment(1);
    Ok(Json(overview))
}
