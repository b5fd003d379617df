//! Ordered request pipeline.
//!
//! Stages are plain objects run in registration order by [`Pipeline::run`].
//! The first stage that does not return [`PipelineDecision::Continue`] ends
//! the run; otherwise the request falls through to the router (static files,
//! then the SPA fallback).

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::IncomingRequest;

/// Outcome of a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineDecision {
    /// Hand the request to the next stage unchanged.
    Continue,
    /// End the request with a redirect to the given absolute URL.
    Redirect(String),
}

/// A synchronous request handler in the pipeline.
pub trait PipelineStage: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn handle(&self, request: &IncomingRequest) -> PipelineDecision;
}

/// Fixed, ordered list of stages. Immutable once built.
#[derive(Default, Clone)]
pub struct Pipeline {
    stages: Vec<Arc<dyn PipelineStage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage. Stages run in the order they are added.
    pub fn with_stage<S: PipelineStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage until one short-circuits.
    pub fn run(&self, request: &IncomingRequest) -> PipelineDecision {
        for stage in &self.stages {
            match stage.handle(request) {
                PipelineDecision::Continue => continue,
                decision => {
                    tracing::debug!(stage = stage.name(), ?decision, "Pipeline short-circuited");
                    return decision;
                }
            }
        }
        PipelineDecision::Continue
    }
}

/// State for [`pipeline_middleware`].
#[derive(Clone)]
pub struct PipelineState {
    pub pipeline: Arc<Pipeline>,
    pub trust_forwarded_proto: bool,
}

/// Axum middleware running the pipeline ahead of the router.
pub async fn pipeline_middleware(
    State(state): State<PipelineState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let view = IncomingRequest::from_http(&request, state.trust_forwarded_proto);

    match state.pipeline.run(&view) {
        PipelineDecision::Continue => next.run(request).await,
        PipelineDecision::Redirect(location) => match HeaderValue::from_str(&location) {
            Ok(value) => {
                tracing::info!(from = %view.path, to = %location, "Redirecting to HTTPS");
                (StatusCode::FOUND, [(header::LOCATION, value)]).into_response()
            }
            Err(_) => {
                tracing::warn!(location = %location, "Redirect target is not a valid header value, continuing");
                next.run(request).await
            }
        },
    }
}
