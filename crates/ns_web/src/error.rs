use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use ns_core::Error;
use serde_json::json;

use crate::render;

/// JSON error response for the API routes.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            e if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            Error::ServiceUnavailable { .. } | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidCredentials(_) => StatusCode::BAD_GATEWAY,
            Error::Synthesis(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Same status as the JSON response, rendered for browser form posts.
    pub fn into_page(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), "{}", self.0);
        (status, Html(render::error_page(&self.0.to_string()))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self.0);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
