//! HTTPS enforcement.
//!
//! Plaintext requests are redirected to the same host and path over HTTPS,
//! unless a debugger is attached or the redirect is disabled in settings.

use std::str::FromStr;
use std::sync::Arc;

use axum::http::uri::Authority;

use crate::config::{AppSettings, Settings};
use crate::http::pipeline::{PipelineDecision, PipelineStage};
use crate::http::request::IncomingRequest;
use crate::lifecycle::DebuggerProbe;

/// Decide whether `request` may proceed or must be sent to HTTPS.
///
/// Pure: the same inputs always give the same decision. A missing or
/// malformed host cannot produce a redirect target, so it continues.
pub fn decide(request: &IncomingRequest, settings: &AppSettings, debugger_attached: bool) -> PipelineDecision {
    if request.is_https() || debugger_attached || !settings.enable_https_redirect {
        return PipelineDecision::Continue;
    }

    let Some(host) = request.host.as_deref().and_then(|h| redirect_host(h, settings.https_port)) else {
        tracing::warn!(host = ?request.host, path = %request.path, "Cannot build HTTPS redirect, host missing or malformed");
        return PipelineDecision::Continue;
    };

    let mut target = format!("https://{}{}", host, request.path);
    if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    PipelineDecision::Redirect(target)
}

/// Validate the host and apply the configured HTTPS port.
fn redirect_host(host: &str, https_port: Option<u16>) -> Option<String> {
    if host.is_empty() || host.contains('@') {
        return None;
    }
    let authority = Authority::from_str(host).ok()?;

    Some(match https_port {
        None => authority.as_str().to_string(),
        Some(443) => authority.host().to_string(),
        Some(port) => format!("{}:{}", authority.host(), port),
    })
}

/// Whether the debugger flag can change the outcome of [`decide`].
fn debugger_matters(request: &IncomingRequest, settings: &AppSettings) -> bool {
    settings.enable_https_redirect && !request.is_https()
}

/// Pipeline stage wrapping [`decide`].
pub struct HttpsEnforcement {
    settings: Arc<Settings>,
    debugger: DebuggerProbe,
}

impl HttpsEnforcement {
    pub fn new(settings: Arc<Settings>, debugger: DebuggerProbe) -> Self {
        Self { settings, debugger }
    }
}

impl PipelineStage for HttpsEnforcement {
    fn name(&self) -> &'static str {
        "https_enforcement"
    }

    fn handle(&self, request: &IncomingRequest) -> PipelineDecision {
        let settings = &self.settings.app_settings;
        // The probe reads procfs; skip it when the answer is already known.
        let debugger_attached = debugger_matters(request, settings) && self.debugger.is_attached();
        decide(request, settings, debugger_attached)
    }
}
