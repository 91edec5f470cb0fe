//! Cross-cutting layers applied to every route: correlation id, request
//! tracing, panic recovery and transport timeouts.

use std::any::Any;

use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Router};
use configs::ServerConfig;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::RequestBodyTimeoutLayer,
    trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info_span, Level, Span};

use crate::errors::ApiError;
use crate::response::ApiResponse;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const REQUEST_TIMEOUT_MESSAGE: &str = "request timed out";

/// Span for one request; carries the correlation id set by `SetRequestIdLayer`.
fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Turn a handler panic into the generic 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

/// Render errors raised by the write timeout as envelopes.
async fn handle_timeout_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        ApiResponse::error(StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT_MESSAGE).into_response()
    } else {
        ApiError::Internal(format!("middleware error: {err}")).into_response()
    }
}

/// Wrap `router` with the full middleware stack, outermost first.
pub fn apply(router: Router, cfg: &ServerConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_request_span)
                    // status and latency on every response
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    )
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(RequestBodyTimeoutLayer::new(cfg.read_timeout()))
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .layer(TimeoutLayer::new(cfg.write_timeout())),
    )
}
