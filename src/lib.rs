//! Single-page-application host.
//!
//! Serves a built SPA bundle: plaintext requests are redirected to HTTPS
//! (unless disabled or a debugger is attached), static files are served from
//! the web root, and every other path gets the root index document.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::Settings;
pub use http::HostServer;
pub use lifecycle::{DebuggerProbe, Shutdown};
