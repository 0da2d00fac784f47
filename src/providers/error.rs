use thiserror::Error;

/// Failure kinds surfaced by issue providers. Every variant carries the
/// attempted URL or path so callers can report where the request went.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to encode request body for '{url}'")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to '{url}' failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request '{path}' not found")]
    RequestNotFound { path: String },

    #[error("request '{path}' failed: {status}")]
    RequestFailed {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from '{url}'")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no issue matching '{id}'")]
    NotFound { id: String },
}

impl ProviderError {
    /// True for both flavors of not-found: a 404 from the backend, and a
    /// query that matched zero records.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestNotFound { .. } | Self::NotFound { .. })
    }
}
