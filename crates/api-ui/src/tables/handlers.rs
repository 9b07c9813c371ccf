use crate::error::{self as api_error, ApiResult, ErrorResponse};
use crate::state::AppState;
use crate::tables::models::QueryParameters;
use axum::extract::rejection::QueryRejection;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use core_explorer::introspect::{self, describe_table};
use core_explorer::pagination::{PageRequest, query_page};
use core_explorer::{ColumnDescriptor, Page, TableDescription, TablePage};
use snafu::ResultExt;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(list_tables, get_table_info, query_table),
    components(schemas(TableDescription, ColumnDescriptor, TablePage, Page, ErrorResponse)),
    tags(
        (name = "tables", description = "Table discovery and row browsing")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "listTables",
    tags = ["tables"],
    path = "/api/tables/{db}",
    params(
        ("db" = String, Path, description = "Database name")
    ),
    responses(
        (status = 200, description = "Table names in name order", body = Vec<String>),
        (status = 404, description = "Unknown or missing database", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn list_tables(
    State(state): State<AppState>,
    Path(db): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let tables = state.provider.run(&db, introspect::list_tables).await?;
    Ok(Json(tables))
}

#[utoipa::path(
    get,
    operation_id = "getTableInfo",
    tags = ["tables"],
    path = "/api/table-info/{db}/{table}",
    params(
        ("db" = String, Path, description = "Database name"),
        ("table" = String, Path, description = "Table name")
    ),
    responses(
        (status = 200, description = "Columns and row count", body = TableDescription),
        (status = 400, description = "Malformed table name", body = ErrorResponse),
        (status = 404, description = "Unknown database or table", body = ErrorResponse),
        (status = 504, description = "Query deadline exceeded", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_table_info(
    State(state): State<AppState>,
    Path((db, table)): Path<(String, String)>,
) -> ApiResult<Json<TableDescription>> {
    let description = state
        .provider
        .run(&db, move |conn| describe_table(conn, &table))
        .await?;
    Ok(Json(description))
}

#[utoipa::path(
    get,
    operation_id = "queryTable",
    tags = ["tables"],
    path = "/api/query/{db}/{table}",
    params(
        ("db" = String, Path, description = "Database name"),
        ("table" = String, Path, description = "Table name"),
        QueryParameters,
    ),
    responses(
        (status = 200, description = "One page of rows", body = TablePage),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse),
        (status = 404, description = "Unknown database or table", body = ErrorResponse),
        (status = 504, description = "Query deadline exceeded", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn query_table(
    State(state): State<AppState>,
    Path((db, table)): Path<(String, String)>,
    params: Result<Query<QueryParameters>, QueryRejection>,
) -> ApiResult<Json<TablePage>> {
    let Query(params) = params.context(api_error::BadQuerySnafu)?;
    let request = PageRequest::new(
        params.page,
        params.per_page,
        state.config.pagination.rows_per_page,
    )?;
    let page = state
        .provider
        .run(&db, move |conn| query_page(conn, &table, request))
        .await?;
    Ok(Json(page))
}
