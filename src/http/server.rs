//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router: pipeline middleware, static files, SPA fallback
//! - Wire up tower-http layers (tracing, request ID, timeout)
//! - Serve the plaintext listener and the optional TLS listener
//! - Drain both on shutdown

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Extension, Router};
use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::http::middleware::HttpsEnforcement;
use crate::http::pipeline::{pipeline_middleware, Pipeline, PipelineState};
use crate::http::request::{ListenerScheme, RequestScheme};
use crate::lifecycle::{DebuggerProbe, Shutdown};
use crate::net::load_tls_config;
use crate::routing::spa_router;

/// Grace period for in-flight TLS connections after shutdown is requested.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid HTTPS address {0:?}")]
    HttpsAddress(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS listener task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// HTTP host for the single-page application.
pub struct HostServer {
    router: Router,
    settings: Arc<Settings>,
}

impl HostServer {
    pub fn new(settings: Arc<Settings>, debugger: DebuggerProbe) -> Self {
        let router = Self::build_router(&settings, debugger);
        Self { router, settings }
    }

    /// Request handling chain, outermost first:
    /// request ID → trace → timeout → HTTPS enforcement → static files → SPA index.
    #[allow(deprecated)]
    fn build_router(settings: &Arc<Settings>, debugger: DebuggerProbe) -> Router {
        let pipeline = Pipeline::new().with_stage(HttpsEnforcement::new(settings.clone(), debugger));
        let state = PipelineState {
            pipeline: Arc::new(pipeline),
            trust_forwarded_proto: settings.server.trust_forwarded_proto,
        };

        spa_router(&settings.server)
            .layer(middleware::from_fn_with_state(state, pipeline_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(settings.server.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Router as seen by a listener accepting `scheme` connections.
    pub fn router_for(&self, scheme: RequestScheme) -> Router {
        self.router.clone().layer(Extension(ListenerScheme(scheme)))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Serve until `shutdown` fires. The TLS listener starts too when configured.
    ///
    /// Both sockets are bound before either serves. If one listener fails
    /// while running, `run` returns its error.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), ServerError> {
        let https = self.spawn_https(&shutdown).await?;

        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, scheme = "http", "HTTP server starting");

        let stop = shutdown.clone();
        let http = axum::serve(listener, self.router_for(RequestScheme::Http))
            .with_graceful_shutdown(async move { stop.triggered().await })
            .into_future();
        let mut http = std::pin::pin!(http);

        match https {
            None => http.await?,
            Some(mut https) => {
                let https_done_first = tokio::select! {
                    res = &mut http => { res?; false }
                    res = &mut https => { res??; true }
                };
                if https_done_first {
                    http.await?;
                } else {
                    https.await??;
                }
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    async fn spawn_https(
        &self,
        shutdown: &Shutdown,
    ) -> Result<Option<JoinHandle<std::io::Result<()>>>, ServerError> {
        let server = &self.settings.server;
        let (Some(address), Some(tls)) = (&server.https_address, &server.tls) else {
            return Ok(None);
        };

        let addr: SocketAddr = address
            .parse()
            .map_err(|_| ServerError::HttpsAddress(address.clone()))?;
        let socket = TcpListener::bind(addr)
            .await
            .and_then(TcpListener::into_std)
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;
        let config = load_tls_config(tls).await?;
        let local = socket.local_addr()?;

        let handle = Handle::new();
        let drain = handle.clone();
        let stop = shutdown.clone();
        tokio::spawn(async move {
            stop.triggered().await;
            drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
        });

        tracing::info!(address = %local, scheme = "https", "HTTP server starting");
        let app = self.router_for(RequestScheme::Https);
        let task = tokio::spawn(async move {
            axum_server::from_tcp_rustls(socket, config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        });

        Ok(Some(task))
    }
}
