use crate::error::ErrorResponse;
use crate::state::AppState;
use axum::{Json, extract::State};
use core_registry::DatabaseEntry;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(list_databases),
    components(schemas(DatabaseEntry, ErrorResponse)),
    tags(
        (name = "databases", description = "Configured databases")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "listDatabases",
    tags = ["databases"],
    path = "/api/databases",
    responses(
        (status = 200, description = "Configured databases in name order", body = Vec<DatabaseEntry>),
    )
)]
#[tracing::instrument(level = "debug", skip(state), ret(level = tracing::Level::TRACE))]
pub async fn list_databases(State(state): State<AppState>) -> Json<Vec<DatabaseEntry>> {
    Json(state.provider.registry().list_all())
}
