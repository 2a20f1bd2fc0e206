pub mod page;
pub mod relay;

use crate::backend::RelayError;
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

// Bodies produced by the relay itself. Backend bodies never go through this,
// they are passed on as raw bytes.
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug)]
pub enum AppError {
    InvalidJson(serde_json::Error),
    MultipartRejection(MultipartRejection),
    Multipart(MultipartError),
    MissingField(&'static str),
    Relay(RelayError),
}

// Tell axum how `AppError` should be converted into a response.
//
// This is also a convenient place to log errors.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The browser reads `error` off every failed relay call
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, error) = match self {
            AppError::InvalidJson(error) => {
                // This error is caused by bad user input so don't log it
                (StatusCode::BAD_REQUEST, format!("invalid JSON body: {}", error))
            }
            AppError::MultipartRejection(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Multipart(error) => (error.status(), error.body_text()),
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("missing field `{}`", field),
            ),
            AppError::Relay(error) => {
                tracing::error!("backend call failed: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
        };

        (status, AppJson(ErrorResponse { error })).into_response()
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::MultipartRejection(rejection)
    }
}

impl From<MultipartError> for AppError {
    fn from(error: MultipartError) -> Self {
        Self::Multipart(error)
    }
}

impl From<RelayError> for AppError {
    fn from(error: RelayError) -> Self {
        Self::Relay(error)
    }
}

pub async fn health_check() -> &'static str {
    "ok"
}
