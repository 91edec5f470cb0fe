use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "something went wrong";

/// Response envelope: serializes as `{"data": ...}` or `{"error": "..."}`,
/// never both.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Envelope<T> {
    Data(T),
    Error(String),
}

#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: StatusCode::OK, body: Envelope::Data(data) }
    }

    pub fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, body: Envelope::Data(data) }
    }
}

impl ApiResponse<()> {
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: Envelope::Error(message.into()) }
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut resp = (status, body).into_response();
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}

/// Fixed 500 envelope, used when encoding fails or a handler panics.
pub fn internal_error_response() -> Response {
    let body = format!(r#"{{"error":"{INTERNAL_ERROR_MESSAGE}"}}"#);
    json_response(StatusCode::INTERNAL_SERVER_ERROR, body.into_bytes())
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.body) {
            Ok(bytes) => json_response(self.status, bytes),
            Err(e) => {
                error!(error = %e, "failed to encode response body");
                internal_error_response()
            }
        }
    }
}
