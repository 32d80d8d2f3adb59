use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::Endpoint;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("{endpoint} request failed: {message}")]
    #[diagnostic(help("the remote API may be unreachable; retry the refresh later"))]
    Transport { endpoint: Endpoint, message: String },

    #[error("{endpoint} returned status {status}")]
    #[diagnostic(help("the remote API rejected the request; retry the refresh later"))]
    Status { endpoint: Endpoint, status: u16 },

    #[error("failed to decode {endpoint} payload: {message}")]
    Decode { endpoint: Endpoint, message: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("artist not found: {0}")]
    ArtistNotFound(i64),
}

impl CatalogError {
    /// Remote failures that leave the catalog untouched and may succeed on a
    /// later refresh.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::Transport { .. }
                | CatalogError::Status { .. }
                | CatalogError::Decode { .. }
        )
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            CatalogError::Transport { endpoint, .. }
            | CatalogError::Status { endpoint, .. }
            | CatalogError::Decode { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}
