//! Read-only request view used by pipeline stages.
//!
//! # Responsibilities
//! - Determine the scheme a request arrived with (listener, or trusted `X-Forwarded-Proto`)
//! - Extract host, path and query
//! - Keep stages independent of the body type

use axum::http::{header, Request};

/// Header consulted when forwarded-proto trust is enabled.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Transport scheme of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScheme {
    Http,
    Https,
}

impl RequestScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestScheme::Http => "http",
            RequestScheme::Https => "https",
        }
    }

    /// Parse a scheme name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("https") {
            Some(RequestScheme::Https)
        } else if value.eq_ignore_ascii_case("http") {
            Some(RequestScheme::Http)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RequestScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme of the listener that accepted the connection.
///
/// Inserted as a request extension by each listener's router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerScheme(pub RequestScheme);

/// What a pipeline stage sees of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    pub scheme: RequestScheme,
    /// Host (and optional port) the client addressed. `None` when absent or not valid text.
    pub host: Option<String>,
    pub path: String,
    pub query: Option<String>,
}

impl IncomingRequest {
    pub fn new(scheme: RequestScheme, host: Option<&str>, path: &str, query: Option<&str>) -> Self {
        Self {
            scheme,
            host: host.map(str::to_string),
            path: path.to_string(),
            query: query.map(str::to_string),
        }
    }

    /// Build the view from a hosted request.
    ///
    /// Scheme precedence: trusted `X-Forwarded-Proto` (first entry), then the
    /// accepting listener, then the request URI, then plain `http`.
    pub fn from_http<B>(request: &Request<B>, trust_forwarded_proto: bool) -> Self {
        let forwarded = trust_forwarded_proto
            .then(|| request.headers().get(X_FORWARDED_PROTO))
            .flatten()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(RequestScheme::parse);

        let scheme = forwarded
            .or_else(|| request.extensions().get::<ListenerScheme>().map(|l| l.0))
            .or_else(|| request.uri().scheme_str().and_then(RequestScheme::parse))
            .unwrap_or(RequestScheme::Http);

        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| request.uri().authority().map(|a| a.as_str().to_string()));

        Self {
            scheme,
            host,
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
        }
    }

    pub fn is_https(&self) -> bool {
        self.scheme == RequestScheme::Https
    }
}
