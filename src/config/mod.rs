//! Settings resolution subsystem.
//!
//! # Data Flow
//! ```text
//! appsettings.json
//!     → loader.rs (mandatory JSON layer, keys case-folded)
//!     → config::Environment (SPAHOST_* overrides)
//!     → config::Config override (development telemetry layer)
//!     → validation.rs (semantic checks)
//!     → Settings (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Resolved once at startup; no reload while serving
//! - Any malformed layer is fatal, never a silent default
//! - All fields have defaults to allow minimal files

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve, resolve_with_vars, ConfigError, HostEnvironment, ResolveOptions};
pub use schema::{AppSettings, LogFormat, LoggingSettings, ServerSettings, Settings, TlsSettings};
