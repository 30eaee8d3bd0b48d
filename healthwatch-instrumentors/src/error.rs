//! Error types for probe backends.

use thiserror::Error;

/// A probe's underlying request failed before a verdict could be read.
///
/// Probes translate these into `Status::Down` (or `Status::NotFound`)
/// before the scanner boundary; the error type exists so the translation
/// has something structured to log.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Name resolution failed; the target may not exist.
    #[error("Resolution failed: {0}")]
    Resolution(String),

    /// Timeout waiting for the target.
    #[error("Request timed out")]
    Timeout,
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if err.is_connect() {
            ProbeError::Connection(err.to_string())
        } else {
            ProbeError::Http(err.to_string())
        }
    }
}
