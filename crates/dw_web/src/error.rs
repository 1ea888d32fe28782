use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dw_core::Error;
use serde_json::json;
use tracing::error;

/// Maps core errors onto HTTP statuses with a `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.root() {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
