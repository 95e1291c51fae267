//! SunCar backend integration
//!
//! Everything that talks to the remote backend lives here: the HTTP client,
//! the raw wire models, the offer normalizer, the degrade-to-empty lookups
//! (materials photos, warranty terms) and the recommendation reconciler.

pub mod client;
pub mod mapper;
pub mod materials;
pub mod models;
pub mod recommender;
pub mod terms;

use thiserror::Error;

pub use client::SuncarBackend;

/// Errors from backend calls
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend responded with a non-2xx status; body is preserved verbatim
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend responded 2xx but with success:false or missing data
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    /// Recommender reply did not match either of its two documented shapes
    #[error("Invalid recommender format: {0}")]
    InvalidFormat(String),
}

impl BackendError {
    /// HTTP status to report to the caller. Upstream statuses are mirrored
    /// where known; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::Api { status, .. } => *status,
            _ => 500,
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
