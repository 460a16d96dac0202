use reqwest::StatusCode;
use thiserror::Error;

/// Why a PMS request did not produce a usable payload
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never got a response: connection refused, timeout, TLS, …
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} responded with {status}")]
    Status { path: String, status: StatusCode },

    #[error("malformed {entity} response from {path}: {source}")]
    Malformed {
        entity: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Network level failure, as opposed to a bad response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The PMS answered, but with a non-2xx status or an unparseable body
    pub fn is_response(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Malformed { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
