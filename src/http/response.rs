//! Error responses.
//!
//! Request-level failures map to a status code here; everything else is left
//! to the hosting layer.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure to produce the SPA index document.
#[derive(Debug, thiserror::Error)]
pub enum SpaError {
    #[error("index document {0:?} not found")]
    IndexMissing(PathBuf),

    #[error("failed to read index document {path:?}: {source}")]
    IndexUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpaError {
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            SpaError::IndexMissing(path)
        } else {
            SpaError::IndexUnreadable { path, source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SpaError::IndexMissing(_) => StatusCode::NOT_FOUND,
            SpaError::IndexUnreadable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SpaError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "SPA fallback failed");
        } else {
            tracing::warn!(error = %self, "SPA fallback has no document to serve");
        }
        (status, status.canonical_reason().unwrap_or("Error")).into_response()
    }
}
