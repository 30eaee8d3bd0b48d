//! # healthwatch-instrumentors
//!
//! Pre-built instrumentors for probing common infrastructure.
//!
//! Each instrumentor turns a class of external resource into healthwatch
//! sensors. They are gated behind cargo features so you only pull in the
//! client crates you need:
//!
//! - `http`: probe HTTP health endpoints via reqwest
//! - `tcp`: probe TCP reachability via tokio
//! - `all`: everything above
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use healthwatch_instrumentors::http::HttpInstrumentor;
//! use healthwatch_sdk::{Params, Registry};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = Registry::new();
//! registry.register_all(Arc::new(HttpInstrumentor::default()));
//!
//! let scanners = registry.instrument(
//!     &HttpInstrumentor::kind(),
//!     &json!({ "name": "homepage", "url": "https://example.com/health" }),
//! )?;
//! # Ok(()) }
//! ```

mod error;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

pub use error::ProbeError;

/// The namespace all built-in instrumentor kinds live under.
pub const NAMESPACE: &str = "healthwatch.io";
