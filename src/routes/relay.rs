use super::AppError;
use crate::{
    backend::types::{ImageFile, ImageReply, JsonReply},
    docs::{BackendStatus, ErrorResponse, GenerateRequest, GenerateResponse, UploadForm, UploadResponse},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::de::IgnoredAny;
use std::sync::Arc;

const OPENAPI_TAG: &str = "Relay";

impl IntoResponse for JsonReply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

impl IntoResponse for ImageReply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.bytes,
        )
            .into_response()
    }
}

/// Check backend
///
/// Report whether the backend is reachable. Always answers 200, an unreachable
/// backend shows up as `comfyui_accessible: false`.
#[utoipa::path(
    get,
    path = "/api/test",
    responses((
        status = OK,
        body = BackendStatus
    )),
    tag = OPENAPI_TAG
)]
pub async fn test_backend(State(app_state): State<Arc<AppState>>) -> JsonReply {
    app_state.backend().check_status().await
}

/// Upload images
///
/// Forward the person and garment images to the backend.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses((
        status = OK,
        description = "Backend status and body, passed through.",
        body = UploadResponse
    ), (
        status = BAD_REQUEST,
        description = "An image field is missing.",
        body = ErrorResponse
    ), (
        status = INTERNAL_SERVER_ERROR,
        description = "Backend unreachable.",
        body = ErrorResponse
    )),
    tag = OPENAPI_TAG
)]
pub async fn upload(
    State(app_state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<JsonReply, AppError> {
    let mut multipart = multipart?;
    let mut person_image = None;
    let mut garment_image = None;

    while let Some(field) = multipart.next_field().await? {
        let slot = match field.name() {
            Some("person_image") => &mut person_image,
            Some("garment_image") => &mut garment_image,
            _ => continue,
        };

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        *slot = Some(ImageFile {
            file_name,
            content_type,
            bytes,
        });
    }

    let person_image = person_image.ok_or(AppError::MissingField("person_image"))?;
    let garment_image = garment_image.ok_or(AppError::MissingField("garment_image"))?;

    let reply = app_state
        .backend()
        .forward_upload(person_image, garment_image)
        .await?;

    Ok(reply)
}

/// Generate try-on
///
/// Forward the generation parameters to the backend unchanged.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body(content = GenerateRequest, content_type = "application/json"),
    responses((
        status = OK,
        description = "Backend status and body, passed through.",
        body = GenerateResponse
    ), (
        status = BAD_REQUEST,
        description = "The body is not JSON.",
        body = ErrorResponse
    ), (
        status = INTERNAL_SERVER_ERROR,
        description = "Backend unreachable.",
        body = ErrorResponse
    )),
    tag = OPENAPI_TAG
)]
pub async fn generate(
    State(app_state): State<Arc<AppState>>,
    payload: Bytes,
) -> Result<JsonReply, AppError> {
    // checked, not decoded: the bytes go to the backend untouched
    serde_json::from_slice::<IgnoredAny>(&payload).map_err(AppError::InvalidJson)?;

    let reply = app_state.backend().forward_generate(payload).await?;

    Ok(reply)
}

/// Get result
///
/// Fetch a generated image from the backend by filename.
#[utoipa::path(
    get,
    path = "/api/result/{filename}",
    params(("filename" = String, Path, description = "Filename returned by generate")),
    responses((
        status = OK,
        description = "Image bytes with the backend content type, `image/png` if it sent none."
    ), (
        status = INTERNAL_SERVER_ERROR,
        description = "Backend unreachable.",
        body = ErrorResponse
    )),
    tag = OPENAPI_TAG
)]
pub async fn get_result(
    State(app_state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<ImageReply, AppError> {
    let reply = app_state.backend().forward_result(&filename).await?;

    Ok(reply)
}

pub fn relay_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/test", get(test_backend))
        .route("/upload", post(upload))
        .route("/generate", post(generate))
        .route("/result/:filename", get(get_result))
}
