//! Route handlers, one module per resource.

pub mod courses;
pub mod health;
pub mod students;
pub mod teachers;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::error::ApiError;
use crate::dto::MessageDto;

/// 201 with a `Location` header pointing at the new resource.
pub(crate) fn created<T: Serialize>(location: String, body: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// `{"message": ...}` with the given status.
pub(crate) fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(MessageDto::new(text))).into_response()
}

/// Fallback for unmatched paths.
pub async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}
