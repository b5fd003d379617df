//! TLS configuration and certificate loading for the HTTPS listener.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::config::TlsSettings;

/// Load the rustls configuration from the PEM files named in settings.
pub async fn load_tls_config(tls: &TlsSettings) -> Result<RustlsConfig, std::io::Error> {
    let cert_path = Path::new(&tls.cert_path);
    let key_path = Path::new(&tls.key_path);

    for (what, path) in [("Certificate", cert_path), ("Private key", key_path)] {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{what} file not found: {path:?}"),
            ));
        }
    }

    let config = RustlsConfig::from_pem_file(cert_path, key_path).await?;
    tracing::debug!(cert = ?cert_path, "TLS configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_certificate() {
        let tls = TlsSettings {
            cert_path: "/nonexistent/spa-host/cert.pem".into(),
            key_path: "/nonexistent/spa-host/key.pem".into(),
        };
        let err = load_tls_config(&tls).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("Certificate file not found"));
    }
}
