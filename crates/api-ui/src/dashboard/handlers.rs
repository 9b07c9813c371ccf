use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use core_explorer::dashboard::summarize;
use core_explorer::{DashboardSummary, TableSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(get_dashboard),
    components(schemas(DashboardSummary, TableSummary, ErrorResponse)),
    tags(
        (name = "dashboard", description = "Dashboard endpoints.")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "getDashboard",
    tags = ["dashboard"],
    path = "/api/dashboard/{db}",
    params(
        ("db" = String, Path, description = "Database name")
    ),
    responses(
        (status = 200, description = "Row and column counts per table", body = DashboardSummary),
        (status = 404, description = "Unknown or missing database", body = ErrorResponse),
        (status = 504, description = "Query deadline exceeded", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(db): Path<String>,
) -> ApiResult<Json<DashboardSummary>> {
    Ok(Json(summarize(&state.provider, &db).await?))
}
