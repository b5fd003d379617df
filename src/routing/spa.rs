//! SPA fallback handler.
//!
//! Serves the root index document for any path the static file service did
//! not satisfy, so client-side routing owns every unknown path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::Uri,
    response::{Html, IntoResponse, Response},
};

use crate::http::response::SpaError;

/// The single fallback route target.
#[derive(Debug, Clone)]
pub struct SpaFallback {
    index_path: Arc<PathBuf>,
}

impl SpaFallback {
    pub fn new(web_root: impl AsRef<Path>, index_document: &str) -> Self {
        Self {
            index_path: Arc::new(web_root.as_ref().join(index_document)),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Read the index document. Read per request so a redeployed bundle is
    /// picked up without a restart.
    pub async fn load(&self) -> Result<Vec<u8>, SpaError> {
        tokio::fs::read(self.index_path.as_path())
            .await
            .map_err(|source| SpaError::from_io(self.index_path.to_path_buf(), source))
    }
}

/// Handler for the wildcard route.
pub async fn spa_index(State(spa): State<SpaFallback>, uri: Uri) -> Result<Response, SpaError> {
    let document = spa.load().await?;
    tracing::debug!(path = %uri.path(), "Serving SPA index");
    Ok(Html(document).into_response())
}
