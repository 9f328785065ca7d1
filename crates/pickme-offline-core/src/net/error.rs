use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Network unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid request header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Bad status {status} for {url}")]
    BadStatus { status: u16, url: String },
}

impl FetchError {
    pub fn unreachable(detail: impl Into<String>) -> Self {
        FetchError::Unreachable(detail.into())
    }

    /// Whether this is a transport failure rather than an HTTP answer.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Unreachable(_))
    }
}
