use axum::Router;
use axum::http::StatusCode;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Wraps the app with request tracing, the outer timeout and panic recovery.
///
/// Layers run outermost last: a panicking handler becomes a 500 before the
/// timeout and trace layers see the response.
pub fn with_service_layers(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CatchPanicLayer::new())
}
