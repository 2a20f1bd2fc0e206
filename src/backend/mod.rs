pub mod types;

use crate::config::AppConfig;
use axum::body::Bytes;
use reqwest::{
    header::{HeaderValue, CONTENT_TYPE},
    multipart::Form,
    Client, Response, StatusCode,
};
use serde::de::IgnoredAny;
use serde_json::json;
use thiserror::Error;
use types::{ImageFile, ImageReply, JsonReply, DEFAULT_IMAGE_CONTENT_TYPE};
use url::Url;

/// The backend could not be reached, or answered with something unreadable.
/// Statuses the backend reports itself are never turned into this.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered with a body that is not JSON: {0}")]
    InvalidBody(serde_json::Error),
    #[error("backend url cannot be used as a base: {0}")]
    InvalidBaseUrl(Url),
}

#[derive(Clone, Debug)]
pub struct BackendConnector {
    client: Client,
    base_url: Url,
}

impl BackendConnector {
    pub fn new(config: &AppConfig) -> Result<Self, RelayError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends segments to the base url, keeping any path prefix it carries.
    /// Each segment is percent-encoded, so a filename cannot escape `result/`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Reads the body as-is. It is only checked to be JSON, never re-encoded.
    async fn into_json_reply(response: Response) -> Result<JsonReply, RelayError> {
        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body).map_err(RelayError::InvalidBody)?;

        Ok(JsonReply { status, body })
    }

    async fn fetch_status(&self) -> Result<JsonReply, RelayError> {
        let url = self.endpoint(&["test"])?;
        let response = self.client.get(url).send().await?;
        Self::into_json_reply(response).await
    }

    /// Asks the backend whether it (and ComfyUI behind it) is reachable.
    /// Always answers 200, transport failures are folded into the body.
    pub async fn check_status(&self) -> JsonReply {
        let body = match self.fetch_status().await {
            Ok(reply) => {
                tracing::debug!("backend status answered {}", reply.status);
                reply.body
            }
            Err(e) => {
                tracing::warn!("backend status check failed: {}", e);
                Bytes::from(
                    json!({
                        "status": "error",
                        "error": e.to_string(),
                        "comfyui_accessible": false,
                    })
                    .to_string(),
                )
            }
        };

        JsonReply {
            status: StatusCode::OK,
            body,
        }
    }

    pub async fn forward_upload(
        &self,
        person_image: ImageFile,
        garment_image: ImageFile,
    ) -> Result<JsonReply, RelayError> {
        let url = self.endpoint(&["upload"])?;
        let form = Form::new()
            .part("person_image", person_image.into_part("person_image"))
            .part("garment_image", garment_image.into_part("garment_image"));

        let response = self.client.post(url).multipart(form).send().await?;
        let reply = Self::into_json_reply(response).await?;
        tracing::info!("upload forwarded, backend answered {}", reply.status);

        Ok(reply)
    }

    /// `payload` goes out byte for byte as the browser sent it.
    pub async fn forward_generate(&self, payload: Bytes) -> Result<JsonReply, RelayError> {
        let url = self.endpoint(&["generate"])?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        let reply = Self::into_json_reply(response).await?;
        tracing::info!("generate forwarded, backend answered {}", reply.status);

        Ok(reply)
    }

    pub async fn forward_result(&self, filename: &str) -> Result<ImageReply, RelayError> {
        let url = self.endpoint(&["result", filename])?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_IMAGE_CONTENT_TYPE));
        let bytes = response.bytes().await?;

        tracing::debug!(
            "result {} fetched: {} ({:?}, {} bytes)",
            filename,
            status,
            content_type,
            bytes.len()
        );

        Ok(ImageReply {
            status,
            content_type,
            bytes,
        })
    }
}
