//! Pipeline stages.

pub mod https_redirect;

pub use https_redirect::{decide, HttpsEnforcement};
