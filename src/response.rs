use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::{Deserialize, Serialize};

///
/// Body of every error response: `{ "error": <message> }`
///
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorModel {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorModel { error: message.into() })).into_response()
}

pub fn bad_request_response(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

pub fn not_found_response(message: impl Into<String>) -> Response {
    error_response(StatusCode::NOT_FOUND, message)
}

pub fn internal_server_error_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An error has occurred. Please try again later."
    )
}
