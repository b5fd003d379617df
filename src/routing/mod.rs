//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request that passed the pipeline
//!     → ServeDir (exact file, or index.html of a directory)
//!     → spa.rs (any other path, any method)
//!     → root index document, 200
//! ```
//!
//! # Design Decisions
//! - Exactly one route: the universal wildcard
//! - Static files always get the first chance
//! - No per-resource routes; the client owns unknown paths

pub mod spa;

use std::path::Path;

use axum::{
    routing::{any, MethodRouter},
    Router,
};
use tower_http::services::ServeDir;

use crate::config::ServerSettings;

pub use spa::{spa_index, SpaFallback};

/// Static files from the web root, falling back to the SPA index.
pub fn spa_router(server: &ServerSettings) -> Router {
    let web_root = Path::new(&server.web_root);
    let fallback = SpaFallback::new(web_root, &server.index_document);

    tracing::debug!(
        web_root = %web_root.display(),
        index = %fallback.index_path().display(),
        "Registering SPA fallback route"
    );

    let spa: MethodRouter = any(spa_index).with_state(fallback);
    let static_files = ServeDir::new(web_root)
        .append_index_html_on_directories(true)
        .call_fallback_on_method_not_allowed(true)
        .fallback(spa);

    Router::new().fallback_service(static_files)
}
