//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve settings → Init logging → Build pipeline → Start listeners
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop flag set → Both listeners drain → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: settings first, listeners last
//! - Any startup error is fatal

pub mod debugger;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use debugger::DebuggerProbe;
pub use shutdown::Shutdown;
pub use startup::{start, StartupError};
