//! API error type with `IntoResponse`.
//!
//! Every failure leaves the server as an [`ErrorResponseDto`]. Registry errors keep
//! their own message for 404 and 400; anything unexpected is logged and reported
//! with a generic 500.

use axum::Json;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dto::ErrorResponseDto;
use crate::errors::Error;

/// Result type returned by handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a request, rendered as an `ErrorResponseDto`
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the registry core
    Registry(Error),

    /// Request body was not valid JSON for the target type (400)
    Json(JsonRejection),

    /// A path parameter did not parse (400)
    Path(PathRejection),

    /// No route matched (404)
    EndpointNotFound,
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponseDto) {
        let (status, message, errors) = match self {
            Self::Registry(e @ Error::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, e.to_string(), None)
            }
            Self::Registry(Error::ValidationFailed { errors }) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_owned(),
                Some(errors.clone()),
            ),
            Self::Registry(e) => {
                tracing::error!("Unexpected error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_owned(),
                    None,
                )
            }
            Self::Json(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    "Malformed JSON request".to_owned(),
                    None,
                )
            }
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                path_message(rejection),
                None,
            ),
            Self::EndpointNotFound => (
                StatusCode::NOT_FOUND,
                "Endpoint not found".to_owned(),
                None,
            ),
        };

        let body = ErrorResponseDto {
            status_code: status.as_u16(),
            message,
            errors,
        };
        (status, body)
    }
}

/// "Parameter 'x' should be of type 'integer'" for the offending path segment.
fn path_message(rejection: &PathRejection) -> String {
    let name = match rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::ParseErrorAtKey { key, .. } => key.clone(),
            _ => "id".to_owned(),
        },
        _ => "id".to_owned(),
    };
    format!("Parameter '{name}' should be of type 'integer'")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Registry(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Json(e)
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self::Path(e)
    }
}
