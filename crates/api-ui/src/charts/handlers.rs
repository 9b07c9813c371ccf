use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use core_explorer::ChartSeries;
use core_explorer::temporal::build_daily_series;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(get_chart_data),
    components(schemas(ChartSeries, ErrorResponse)),
    tags(
        (name = "charts", description = "Per-table chart series")
    )
)]
pub struct ApiDoc;

/// Rows per day over the table's first date-like column, or a single
/// total when the table has none.
#[utoipa::path(
    get,
    operation_id = "getChartData",
    tags = ["charts"],
    path = "/api/chart-data/{db}/{table}",
    params(
        ("db" = String, Path, description = "Database name"),
        ("table" = String, Path, description = "Table name")
    ),
    responses(
        (status = 200, description = "Index-aligned labels and values", body = ChartSeries),
        (status = 404, description = "Unknown database or table", body = ErrorResponse),
        (status = 504, description = "Query deadline exceeded", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_chart_data(
    State(state): State<AppState>,
    Path((db, table)): Path<(String, String)>,
) -> ApiResult<Json<ChartSeries>> {
    let series = state
        .provider
        .run(&db, move |conn| build_daily_series(conn, &table))
        .await?;
    Ok(Json(series))
}
