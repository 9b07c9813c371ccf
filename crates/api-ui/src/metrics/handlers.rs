use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use core_explorer::metrics::{latest_sample, recent_series};
use core_explorer::{CurrentMetrics, MetricsDatasets, MetricsSeries};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(get_metrics_comparison, get_current_metrics),
    components(schemas(MetricsSeries, MetricsDatasets, CurrentMetrics, ErrorResponse)),
    tags(
        (name = "metrics", description = "System metrics samples")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "getMetricsComparison",
    tags = ["metrics"],
    path = "/api/metrics-comparison/{db}",
    params(
        ("db" = String, Path, description = "Database name")
    ),
    responses(
        (status = 200, description = "Most recent samples in chronological order", body = MetricsSeries),
        (status = 404, description = "Unknown database or no metrics table", body = ErrorResponse),
        (status = 504, description = "Query deadline exceeded", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_metrics_comparison(
    State(state): State<AppState>,
    Path(db): Path<String>,
) -> ApiResult<Json<MetricsSeries>> {
    Ok(Json(state.provider.run(&db, recent_series).await?))
}

#[utoipa::path(
    get,
    operation_id = "getCurrentMetrics",
    tags = ["metrics"],
    path = "/api/current-metrics/{db}",
    params(
        ("db" = String, Path, description = "Database name")
    ),
    responses(
        (status = 200, description = "Latest sample", body = CurrentMetrics),
        (status = 404, description = "Unknown database, no metrics table or no samples", body = ErrorResponse),
        (status = 504, description = "Query deadline exceeded", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_current_metrics(
    State(state): State<AppState>,
    Path(db): Path<String>,
) -> ApiResult<Json<CurrentMetrics>> {
    Ok(Json(state.provider.run(&db, latest_sample).await?))
}
