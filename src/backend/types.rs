use axum::body::Bytes;
use reqwest::{header::HeaderValue, multipart::Part, StatusCode};

pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

/// An image file as received from the browser, forwarded as one multipart part.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageFile {
    /// Falls back to the field name when the browser sent no file name,
    /// the backend only treats parts with a file name as uploads.
    pub(super) fn into_part(self, field: &str) -> Part {
        let ImageFile {
            file_name,
            content_type,
            bytes,
        } = self;

        let length = bytes.len() as u64;
        let part = match content_type
            .as_deref()
            .map(|ct| Part::stream_with_length(bytes.clone(), length).mime_str(ct))
        {
            Some(Ok(part)) => part,
            _ => Part::stream_with_length(bytes, length),
        };

        part.file_name(file_name.unwrap_or_else(|| field.to_string()))
    }
}

/// Status and JSON body as the backend returned them. The body is kept as
/// the raw bytes so key order and number formatting survive the relay.
#[derive(Clone, Debug)]
pub struct JsonReply {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Clone, Debug)]
pub struct ImageReply {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub bytes: Bytes,
}
