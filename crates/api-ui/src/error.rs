use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::response::{IntoResponse, Response};
use core_explorer::ExplorerError;
use core_registry::RegistryError;
use http::StatusCode;
use http::header::InvalidHeaderValue;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(transparent)]
    Explorer { source: ExplorerError },

    #[snafu(display("Invalid query parameters: {source}"))]
    BadQuery { source: QueryRejection },

    #[snafu(display("No API route for {path}"))]
    RouteNotFound { path: String },

    #[snafu(display("Invalid CORS origin {origin}: {source}"))]
    InvalidOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

pub(crate) trait IntoStatusCode {
    fn status_code(&self) -> StatusCode;
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
}

impl IntoStatusCode for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Explorer { source } => match source {
                ExplorerError::Registry { source } => match source {
                    RegistryError::DatabaseNotFound { .. } => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                },
                ExplorerError::DatabaseUnavailable { .. }
                | ExplorerError::TableNotFound { .. }
                | ExplorerError::MetricsTableNotFound { .. }
                | ExplorerError::NoMetricsData { .. } => StatusCode::NOT_FOUND,
                ExplorerError::InvalidPagination { .. }
                | ExplorerError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
                ExplorerError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ExplorerError::Open { .. }
                | ExplorerError::Sqlite { .. }
                | ExplorerError::TaskJoin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadQuery { .. } => StatusCode::BAD_REQUEST,
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidOrigin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let message = self.to_string();
        if code == StatusCode::GATEWAY_TIMEOUT {
            tracing::warn!(error = %message, "request deadline exceeded");
        } else if code.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }
        let error = ErrorResponse {
            error: message,
            status_code: code.as_u16(),
        };
        (code, Json(error)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ApiError::from(ExplorerError::from(RegistryError::DatabaseNotFound {
                    db: "x".to_string(),
                })),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ExplorerError::TableNotFound {
                    table: "t".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ExplorerError::NoMetricsData {
                    table: "t".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ExplorerError::InvalidPagination {
                    reason: "page".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(ExplorerError::InvalidIdentifier {
                    ident: String::new(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(ExplorerError::Timeout),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApiError::RouteNotFound {
                    path: "/api/nope".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ExplorerError::from(rusqlite::Error::InvalidQuery)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, code) in cases {
            assert_eq!(error.status_code(), code, "{error}");
        }
    }
}
