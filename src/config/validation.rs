//! Settings validation.
//!
//! Serde checks shape; this module checks meaning. All problems are collected
//! so a broken settings file is reported in one go.

use std::net::SocketAddr;
use std::path::{Component, Path};

use crate::config::schema::Settings;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Server.{field} is not a socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Server.HttpsAddress requires Server.Tls")]
    HttpsWithoutTls,

    #[error("Server.Tls.{0} is empty")]
    EmptyTlsPath(&'static str),

    #[error("AppSettings.HttpsPort must be non-zero")]
    ZeroHttpsPort,

    #[error("Server.RequestTimeoutSecs must be non-zero")]
    ZeroTimeout,

    #[error("Server.IndexDocument must be a plain file name: {0:?}")]
    InvalidIndexDocument(String),
}

pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let server = &settings.server;

    if server.http_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "HttpAddress",
            value: server.http_address.clone(),
        });
    }

    if let Some(addr) = &server.https_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "HttpsAddress",
                value: addr.clone(),
            });
        }
        if server.tls.is_none() {
            errors.push(ValidationError::HttpsWithoutTls);
        }
    }

    if let Some(tls) = &server.tls {
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::EmptyTlsPath("CertPath"));
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::EmptyTlsPath("KeyPath"));
        }
    }

    if settings.app_settings.https_port == Some(0) {
        errors.push(ValidationError::ZeroHttpsPort);
    }

    if server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut components = Path::new(&server.index_document).components();
    let plain_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain_name {
        errors.push(ValidationError::InvalidIndexDocument(server.index_document.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
