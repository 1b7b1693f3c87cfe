use thiserror::Error;

/// Failure of a request to the frame device
///
/// `Conflict` is an expected business outcome (another power action is
/// already running) and is kept apart from real failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("{}", .message.as_deref().unwrap_or(ApiError::CONFLICT_FALLBACK))]
    Conflict { message: Option<String> },

    #[error("server returned status {status}: {}", .message.as_deref().unwrap_or("Unknown error"))]
    Status { status: u16, message: Option<String> },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub const CONFLICT_FALLBACK: &str = "A power action is already in progress";

    /// The reason shown to the user: the server's explanation when it sent one
    pub fn reason(&self) -> String {
        match self {
            Self::Network(reason) => reason.clone(),
            Self::Conflict { message } => message
                .clone()
                .unwrap_or_else(|| Self::CONFLICT_FALLBACK.to_string()),
            Self::Status { message, .. } => message
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
            Self::Malformed(reason) => format!("malformed response: {reason}"),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
