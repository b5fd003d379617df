//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use spa_host::{DebuggerProbe, HostServer, Settings, Shutdown};
use tokio::net::TcpListener;

pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"app\"></div></body></html>";
pub const APP_JS: &str = "console.log('spa');";

/// A throwaway web root holding a small SPA bundle.
pub struct WebRoot {
    path: PathBuf,
}

impl WebRoot {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("spa-host-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(path.join("assets")).unwrap();
        fs::create_dir_all(path.join("docs")).unwrap();
        fs::write(path.join("index.html"), INDEX_HTML).unwrap();
        fs::write(path.join("assets/app.js"), APP_JS).unwrap();
        fs::write(path.join("docs/index.html"), "docs").unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WebRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Settings pointing at `web_root`, listening on an ephemeral port.
pub fn settings_for(web_root: &WebRoot) -> Settings {
    let mut settings = Settings::default();
    settings.server.http_address = "127.0.0.1:0".to_string();
    settings.server.web_root = web_root.path().to_string_lossy().into_owned();
    settings
}

/// A running host; shut down on drop.
pub struct RunningHost {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningHost {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningHost {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_host(settings: Settings, debugger: DebuggerProbe) -> RunningHost {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HostServer::new(Arc::new(settings), debugger);

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            let _ = server.run(listener, shutdown).await;
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    RunningHost { addr, shutdown }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
