use crate::charts::handlers::{ApiDoc as ChartsApiDoc, get_chart_data};
use crate::dashboard::handlers::{ApiDoc as DashboardApiDoc, get_dashboard};
use crate::databases::handlers::{ApiDoc as DatabasesApiDoc, list_databases};
use crate::error::{ApiError, ApiResult};
use crate::layers::{add_request_metadata, make_cors_middleware};
use crate::metrics::handlers::{
    ApiDoc as MetricsApiDoc, get_current_metrics, get_metrics_comparison,
};
use crate::state::AppState;
use crate::tables::handlers::{ApiDoc as TablesApiDoc, get_table_info, list_tables, query_table};
use crate::web_assets::static_files;
use axum::extract::OriginalUri;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SQLite Explorer API",
        description = "Read-only browsing of configured SQLite databases.",
        version = "0.1.0",
        license(
            name = "Apache 2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        ),
    ),
    tags()
)]
pub struct ApiDoc;

#[must_use]
pub fn ui_open_api_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(DatabasesApiDoc::openapi())
        .merge_from(TablesApiDoc::openapi())
        .merge_from(DashboardApiDoc::openapi())
        .merge_from(ChartsApiDoc::openapi())
        .merge_from(MetricsApiDoc::openapi())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ui_open_api_spec())
}

// Unknown `/api` paths answer with a JSON 404 instead of the frontend.
async fn api_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound {
        path: uri.path().to_string(),
    }
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/databases", get(list_databases))
        .route("/tables/{db}", get(list_tables))
        .route("/table-info/{db}/{table}", get(get_table_info))
        .route("/query/{db}/{table}", get(query_table))
        .route("/dashboard/{db}", get(get_dashboard))
        .route("/chart-data/{db}/{table}", get(get_chart_data))
        .route("/metrics-comparison/{db}", get(get_metrics_comparison))
        .route("/current-metrics/{db}", get(get_current_metrics))
        .route("/openapi.json", get(openapi_json))
        .fallback(api_not_found)
}

/// The API under `/api`, `/health`, and the static frontend for every other path.
pub fn make_app(state: AppState) -> ApiResult<Router> {
    let config = state.config.clone();
    let mut router = Router::new()
        .nest("/api", create_router().with_state(state))
        .route("/health", get(|| async { Json("OK") }));

    if let Some(static_dir) = config.static_dir.as_deref() {
        router = router.fallback_service(static_files(static_dir));
    }
    if let Some(allow_origin) = config.allow_origin.as_deref() {
        router = router.layer(make_cors_middleware(allow_origin)?);
    }

    Ok(router.layer(axum::middleware::from_fn(add_request_metadata)))
}
