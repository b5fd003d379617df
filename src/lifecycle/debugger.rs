//! Interactive debugger detection.
//!
//! An attached debugger marks a local development session; the HTTPS
//! redirect is skipped so redirect loops don't get in the way of debugging.

use std::fs;

/// Answers "is a debugger attached to this process right now?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebuggerProbe {
    /// Read `TracerPid` from `/proc/self/status` on every call.
    Procfs,
    /// Always report the given value.
    Fixed(bool),
}

impl DebuggerProbe {
    /// The live probe for this platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") {
            DebuggerProbe::Procfs
        } else {
            DebuggerProbe::Fixed(false)
        }
    }

    pub fn is_attached(&self) -> bool {
        match self {
            DebuggerProbe::Fixed(attached) => *attached,
            DebuggerProbe::Procfs => fs::read_to_string("/proc/self/status")
                .ok()
                .and_then(|status| tracer_pid(&status))
                .is_some_and(|pid| pid != 0),
        }
    }
}

impl Default for DebuggerProbe {
    fn default() -> Self {
        Self::detect()
    }
}

fn tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}
