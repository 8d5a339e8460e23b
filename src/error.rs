//! Error type shared by the REST layer and the auth flows.
//!
//! ERROR HANDLING
//! ==============
//! Authorization checks never surface these: the session cache maps every
//! failure to "no identity". Form-backed flows return them so pages can show
//! the backend's message.

/// Errors produced by API calls and the flows built on them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected envelope.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A configured or derived URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// A reset flow was entered without its token query parameter.
    #[error("No reset token provided. Please check your email link.")]
    MissingResetToken,
}

impl ApiError {
    /// Text to show the user: the backend's `message` when it sent one,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            Self::MissingResetToken => self.to_string(),
            _ => fallback.to_owned(),
        }
    }

    /// HTTP status for [`ApiError::Status`], if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status { status: status.as_u16(), message: None }
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
