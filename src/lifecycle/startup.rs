//! Startup orchestration.
//!
//! Settings are resolved first; nothing binds a socket until they are known
//! to be valid, so the process never serves with an undefined redirect policy.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{self, ConfigError, ResolveOptions};
use crate::http::{HostServer, ServerError};
use crate::lifecycle::{signals, DebuggerProbe, Shutdown};
use crate::observability::{init_logging, LoggingError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Resolve settings, start logging, and serve until a termination signal.
pub async fn start(options: ResolveOptions) -> Result<(), StartupError> {
    let settings = config::resolve(&options)?;
    init_logging(&settings.logging, settings.telemetry.developer_mode)?;

    tracing::info!(
        environment = %options.environment,
        settings_file = %options.settings_path.display(),
        https_redirect = settings.app_settings.enable_https_redirect,
        web_root = %settings.server.web_root,
        "Settings resolved"
    );

    let debugger = DebuggerProbe::detect();
    if debugger.is_attached() {
        tracing::warn!("Debugger attached, HTTPS redirect is bypassed while it stays attached");
    }

    let address = settings.server.http_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    HostServer::new(Arc::new(settings), debugger)
        .run(listener, shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
