//! OpenAPI description of the relay. The bodies are owned by the backend and
//! passed through untouched, these types only document what it is expected
//! to send.

use crate::routes::relay;
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    info(title = "tryon-relay", description = "Relay between the try-on page and the generation backend"),
    paths(relay::test_backend, relay::upload, relay::generate, relay::get_result),
    components(schemas(
        BackendStatus,
        UploadForm,
        UploadResponse,
        GenerateRequest,
        GenerateResponse,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

#[derive(ToSchema)]
pub struct BackendStatus {
    #[schema(example = "ok")]
    pub status: String,
    pub comfyui_accessible: bool,
    /// Present when the backend could not be reached.
    pub error: Option<String>,
}

#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub person_image: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    pub garment_image: Vec<u8>,
}

#[derive(ToSchema)]
pub struct UploadResponse {
    #[schema(example = "p1.png")]
    pub person_image: String,
    #[schema(example = "g1.png")]
    pub garment_image: String,
}

/// `steps` and `cfg` ranges are advisory, nothing is enforced here.
#[derive(ToSchema)]
pub struct GenerateRequest {
    pub person_image: String,
    pub garment_image: String,
    #[schema(example = "50")]
    pub steps: String,
    #[schema(example = "2.5")]
    pub cfg: String,
}

#[derive(ToSchema)]
pub struct GenerateResponse {
    #[schema(example = "result123.png")]
    pub image: String,
}

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
