use thiserror::Error;

use crate::api::Endpoint;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API {endpoint} failed: {}", status_line(.status, .reason))]
    Status {
        endpoint: Endpoint,
        status: u16,
        reason: String,
    },

    #[error("API {endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("API {endpoint} returned a malformed response: {detail}")]
    Malformed { endpoint: Endpoint, detail: String },

    #[error("HTTP client setup failed: {0}")]
    Setup(#[source] reqwest::Error),
}

fn status_line(status: &u16, reason: &str) -> String {
    if reason.is_empty() {
        status.to_string()
    } else {
        format!("{status} {reason}")
    }
}

impl ApiError {
    /// Non-2xx responses and transport failures, as opposed to bodies that
    /// break the response contract.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Transport { .. })
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Status { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Malformed { endpoint, .. } => Some(*endpoint),
            Self::Setup(_) => None,
        }
    }
}
