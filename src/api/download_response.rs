//! Download response helper.
//!
//! Streams blob bytes back with the original filename preserved in the
//! Content-Disposition header, the way `res.download(path, name)` did in
//! the service this replaces.

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// File bytes served as an attachment with a suggested filename
pub struct FileAttachment {
    data: Bytes,
    filename: String,
}

impl FileAttachment {
    pub fn new(data: Bytes, filename: impl Into<String>) -> Self {
        Self {
            data,
            filename: filename.into(),
        }
    }
}

impl IntoResponse for FileAttachment {
    fn into_response(self) -> Response {
        // Quotes and control chars in the filename would corrupt the header
        let safe_name: String = self
            .filename
            .chars()
            .filter(|c| *c != '"' && !c.is_control())
            .collect();

        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, self.data.len())
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", safe_name),
            )
            .body(Body::from(self.data))
            .unwrap()
    }
}
