//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Plaintext listener (tokio TcpListener) ──────────────┐
//!                                                      ├─→ HTTP layer
//! TLS listener (axum-server + rustls, optional) ───────┘
//! ```
//!
//! # Design Decisions
//! - TLS is optional; without it the host expects a TLS-terminating front end
//! - Each listener tags its requests with the scheme it accepted them on

pub mod tls;

pub use tls::load_tls_config;
