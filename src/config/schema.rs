//! Settings schema definitions.
//!
//! Keys use the PascalCase names found in `appsettings.json`
//! (`AppSettings.EnableHttpsRedirect`, `Logging.LogLevel.Default`, ...).
//! Every section has defaults so a minimal file only needs the keys it changes.
//! The lowercase aliases accept the case-folded tree built by the resolver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root settings for the host.
///
/// Built once by [`crate::config::resolve`] and shared read-only behind an `Arc`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct Settings {
    /// Application behaviour switches.
    #[serde(alias = "appsettings")]
    pub app_settings: AppSettings,

    /// Log filter and output format.
    #[serde(alias = "logging")]
    pub logging: LoggingSettings,

    /// Listener and content locations.
    #[serde(alias = "server")]
    pub server: ServerSettings,

    /// Telemetry overrides (set by the development layer).
    #[serde(alias = "telemetry")]
    pub telemetry: TelemetrySettings,
}

/// The `AppSettings` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct AppSettings {
    /// Redirect plaintext requests to their HTTPS equivalent.
    #[serde(alias = "enablehttpsredirect")]
    pub enable_https_redirect: bool,

    /// Port placed in redirect targets. `None` keeps the request's host as-is.
    #[serde(alias = "httpsport")]
    pub https_port: Option<u16>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enable_https_redirect: true,
            https_port: None,
        }
    }
}

/// The `Logging` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoggingSettings {
    /// Level per target. `Default` applies to everything not listed.
    #[serde(alias = "loglevel")]
    pub log_level: BTreeMap<String, String>,

    /// Output format.
    #[serde(alias = "format")]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        let mut log_level = BTreeMap::new();
        log_level.insert("Default".to_string(), "Information".to_string());
        Self {
            log_level,
            format: LogFormat::Compact,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// The `Server` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServerSettings {
    /// Plaintext listen address (e.g., "0.0.0.0:8080").
    #[serde(alias = "httpaddress")]
    pub http_address: String,

    /// TLS listen address. Requires `Tls`.
    #[serde(alias = "httpsaddress")]
    pub https_address: Option<String>,

    /// Certificate and key for the TLS listener.
    #[serde(alias = "tls")]
    pub tls: Option<TlsSettings>,

    /// Directory served as static files.
    #[serde(alias = "webroot")]
    pub web_root: String,

    /// Document returned by the SPA fallback, relative to `web_root`.
    #[serde(alias = "indexdocument")]
    pub index_document: String,

    /// Total time allowed per request, in seconds.
    #[serde(alias = "requesttimeoutsecs")]
    pub request_timeout_secs: u64,

    /// Take the request scheme from `X-Forwarded-Proto` when present.
    /// Only enable behind a trusted TLS-terminating front end.
    #[serde(alias = "trustforwardedproto")]
    pub trust_forwarded_proto: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            http_address: "0.0.0.0:8080".to_string(),
            https_address: None,
            tls: None,
            web_root: "wwwroot".to_string(),
            index_document: "index.html".to_string(),
            request_timeout_secs: 30,
            trust_forwarded_proto: false,
        }
    }
}

/// PEM certificate chain and private key paths.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TlsSettings {
    #[serde(alias = "certpath")]
    pub cert_path: String,
    #[serde(alias = "keypath")]
    pub key_path: String,
}

/// The `Telemetry` section.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct TelemetrySettings {
    /// Verbose, human-oriented diagnostics.
    #[serde(alias = "developermode")]
    pub developer_mode: bool,
}
