use axum::{extract::{rejection::JsonRejection, FromRequest}, response::IntoResponse};

use crate::response::bad_request_response;

///
/// `axum::Json`, but malformed bodies are rejected with
/// a 400 and the usual `{ "error": ... }` body.
///
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonBodyRejection))]
pub struct JsonBody<T>(pub T);

pub struct JsonBodyRejection(JsonRejection);

impl From<JsonRejection> for JsonBodyRejection {
    fn from(value: JsonRejection) -> Self {
        Self(value)
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> axum::response::Response {
        bad_request_response(self.0.body_text())
    }
}
