use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// The server answered with `{ok: false}` or an error body
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// True when the server understood the request and refused it, as
    /// opposed to the exchange itself failing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
