use thiserror::Error;

/// Failures raised by the HTTP collaborators. The `Display` text is what the
/// creation surface shows inline, so messages stay short and user-facing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl AppError {
    /// True for 4xx responses, i.e. the server rejected the input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Http { status, .. } if (400..500).contains(status))
    }
}
