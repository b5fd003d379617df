//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection (http or https listener)
//!     → server.rs (Axum setup, tower-http layers)
//!     → request.rs (scheme, host, path view)
//!     → pipeline.rs (ordered stages; HTTPS enforcement may redirect)
//!     → [routing: static files, then SPA index]
//!     → response.rs (error mapping)
//! ```

pub mod middleware;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use pipeline::{Pipeline, PipelineDecision, PipelineStage};
pub use request::{IncomingRequest, ListenerScheme, RequestScheme};
pub use server::{HostServer, ServerError};
