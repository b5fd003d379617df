//! TLS listener startup and bind failures.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use spa_host::config::TlsSettings;
use spa_host::http::ServerError;
use spa_host::{DebuggerProbe, HostServer, Shutdown};
use tokio::net::{TcpListener, TcpStream};

mod common;

use common::{client, settings_for, start_host, WebRoot};

fn fixture_tls() -> TlsSettings {
    TlsSettings {
        cert_path: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cert.pem").into(),
        key_path: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/key.pem").into(),
    }
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::test]
async fn test_https_listener_accepts_connections() {
    let root = WebRoot::new();
    let https_addr = format!("127.0.0.1:{}", free_port());
    let mut settings = settings_for(&root);
    settings.server.https_address = Some(https_addr.clone());
    settings.server.tls = Some(fixture_tls());
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    assert!(TcpStream::connect(&https_addr).await.is_ok());

    let res = client().get(host.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_https_bind_failure_stops_run() {
    let root = WebRoot::new();
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut settings = settings_for(&root);
    settings.server.https_address = Some(taken.local_addr().unwrap().to_string());
    settings.server.tls = Some(fixture_tls());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = HostServer::new(Arc::new(settings), DebuggerProbe::Fixed(false));
    let shutdown = Shutdown::new();

    let result = tokio::time::timeout(Duration::from_secs(5), server.run(listener, shutdown.clone())).await;
    shutdown.trigger();

    let err = result.expect("run kept serving after the HTTPS bind failed").unwrap_err();
    assert!(matches!(err, ServerError::Bind { .. }), "{err}");
}

#[tokio::test]
async fn test_invalid_certificate_stops_run() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.server.https_address = Some(format!("127.0.0.1:{}", free_port()));
    settings.server.tls = Some(TlsSettings {
        cert_path: "/nonexistent/spa-host/cert.pem".into(),
        key_path: "/nonexistent/spa-host/key.pem".into(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = HostServer::new(Arc::new(settings), DebuggerProbe::Fixed(false));

    let result = tokio::time::timeout(Duration::from_secs(5), server.run(listener, Shutdown::new())).await;

    let err = result.expect("run kept serving without a certificate").unwrap_err();
    assert!(matches!(err, ServerError::Io(_)), "{err}");
}
