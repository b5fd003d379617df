//! End-to-end tests for HTTPS enforcement and SPA routing.

use reqwest::header::{HOST, LOCATION};
use reqwest::StatusCode;
use spa_host::DebuggerProbe;

mod common;

use common::{client, settings_for, start_host, WebRoot, APP_JS, INDEX_HTML};

#[tokio::test]
async fn test_plaintext_request_redirected() {
    let root = WebRoot::new();
    let host = start_host(settings_for(&root), DebuggerProbe::Fixed(false)).await;

    let res = client()
        .get(host.url("/reset"))
        .header(HOST, "app.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "https://app.example.com/reset");
}

#[tokio::test]
async fn test_redirect_keeps_query_and_port() {
    let root = WebRoot::new();
    let host = start_host(settings_for(&root), DebuggerProbe::Fixed(false)).await;

    let res = client().get(host.url("/a/b?x=1&y=2")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers()[LOCATION],
        format!("https://{}/a/b?x=1&y=2", host.addr).as_str()
    );
}

#[tokio::test]
async fn test_https_port_setting_used_in_redirect() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.app_settings.https_port = Some(8443);
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    let res = client()
        .get(host.url("/"))
        .header(HOST, "app.example.com:8080")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()[LOCATION], "https://app.example.com:8443/");
}

#[tokio::test]
async fn test_debugger_attached_reaches_routing() {
    let root = WebRoot::new();
    let host = start_host(settings_for(&root), DebuggerProbe::Fixed(true)).await;

    let res = client()
        .get(host.url("/reset"))
        .header(HOST, "app.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn test_redirect_disabled_serves_content() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.app_settings.enable_https_redirect = false;
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    let res = client().get(host.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn test_trusted_forwarded_proto_skips_redirect() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.server.trust_forwarded_proto = true;
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    let res = client()
        .get(host.url("/"))
        .header("X-Forwarded-Proto", "https")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client().get(host.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_untrusted_forwarded_proto_ignored() {
    let root = WebRoot::new();
    let host = start_host(settings_for(&root), DebuggerProbe::Fixed(false)).await;

    let res = client()
        .get(host.url("/"))
        .header("X-Forwarded-Proto", "https")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_static_file_served_before_fallback() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.app_settings.enable_https_redirect = false;
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    let res = client().get(host.url("/assets/app.js")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), APP_JS);

    let res = client().get(host.url("/docs/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "docs");
}

#[tokio::test]
async fn test_unknown_paths_get_root_document() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.app_settings.enable_https_redirect = false;
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;
    let client = client();

    let root_doc = client.get(host.url("/")).send().await.unwrap().text().await.unwrap();

    for path in ["/dashboard/42", "/assets/missing.js", "/a/b/c?tab=2"] {
        let res = client.get(host.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert!(res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html")));
        assert_eq!(res.text().await.unwrap(), root_doc, "path {path}");
    }
}

#[tokio::test]
async fn test_fallback_accepts_any_method() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.app_settings.enable_https_redirect = false;
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    let res = client().post(host.url("/login")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn test_missing_index_document_is_not_found() {
    let root = WebRoot::new();
    let mut settings = settings_for(&root);
    settings.app_settings.enable_https_redirect = false;
    settings.server.index_document = "missing.html".to_string();
    let host = start_host(settings, DebuggerProbe::Fixed(false)).await;

    let res = client().get(host.url("/dashboard")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let root = WebRoot::new();
    let host = start_host(settings_for(&root), DebuggerProbe::Fixed(false)).await;

    let res = client().get(host.url("/")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client()
        .get(host.url("/"))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");
}
