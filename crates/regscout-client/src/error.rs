use thiserror::Error;

/// Coarse classification of a [`RegistryError`], used by the retry loop and
/// by callers deciding whether a failed run is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, rate limit, or upstream server error. Retried.
    Transient,
    /// The request itself is wrong or was refused. Never retried.
    Fatal,
    /// The response body did not match the expected shape. Never retried.
    Parse,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("retryable HTTP status {status} from {url}")]
    RetryableStatus { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid page size {per_page}: must be between 1 and {max}")]
    InvalidPageSize { per_page: u32, max: u32 },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Http(e) => {
                if e.is_decode() {
                    ErrorKind::Parse
                } else if e.is_builder() {
                    ErrorKind::Fatal
                } else {
                    ErrorKind::Transient
                }
            }
            RegistryError::RetryableStatus { .. } => ErrorKind::Transient,
            RegistryError::UnexpectedStatus { .. }
            | RegistryError::InvalidPageSize { .. }
            | RegistryError::InvalidBaseUrl { .. } => ErrorKind::Fatal,
            RegistryError::Deserialize { .. } => ErrorKind::Parse,
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

/// HTTP statuses the registry returns for conditions that clear up on their own.
pub(crate) fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}
