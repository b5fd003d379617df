//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Per request (installed in http/server.rs):
//!     → tower-http TraceLayer spans
//!     → x-request-id generated and echoed back
//! ```

pub mod logging;

pub use logging::{init_logging, LoggingError};
