use std::path::PathBuf;

use thiserror::Error;

/// Generic fallback when the service rejects a submission without saying why.
pub const GENERIC_SERVICE_MESSAGE: &str = "Upload failed";
/// Literal shown when a submission is attempted with nothing queued.
pub const EMPTY_QUEUE_MESSAGE: &str = "Please add at least one resume.";

/// Errors surfaced by the screening client.
/// None of these are fatal: every variant is recovered at the boundary that issued
/// the action and reported through the workspace status line.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Transport-level failure, no usable response obtained.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response obtained with a non-success status.
    #[error("Service error (status {status}): {}", .message.as_deref().unwrap_or(GENERIC_SERVICE_MESSAGE))]
    Service { status: u16, message: Option<String> },

    #[error("Please add at least one resume.")]
    EmptyQueue,

    /// Success status, but the body is not a valid response envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid backend URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build CSV: {0}")]
    Export(#[from] csv::Error),
}

impl ScreenError {
    /// The message shown to the user. Service-provided text wins over the generic
    /// fallback.
    pub fn user_message(&self) -> String {
        match self {
            ScreenError::Network(e) => {
                if e.is_timeout() {
                    "The analysis service timed out".to_string()
                } else {
                    "Could not reach the analysis service".to_string()
                }
            }
            ScreenError::Service { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_SERVICE_MESSAGE.to_string()),
            ScreenError::EmptyQueue => EMPTY_QUEUE_MESSAGE.to_string(),
            ScreenError::MalformedResponse(_) => "Failed to analyze".to_string(),
            ScreenError::Io { path, .. } => format!("Could not read {}", path.display()),
            ScreenError::InvalidBaseUrl(url) => format!("Invalid backend URL: {url}"),
            ScreenError::Export(_) => "Could not build the CSV export".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_prefers_server_text() {
        let err = ScreenError::Service {
            status: 400,
            message: Some("No job description provided".to_string()),
        };
        assert_eq!(err.user_message(), "No job description provided");
    }

    #[test]
    fn test_service_message_falls_back_to_generic() {
        let err = ScreenError::Service {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_SERVICE_MESSAGE);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_empty_queue_message_is_literal() {
        assert_eq!(ScreenError::EmptyQueue.user_message(), EMPTY_QUEUE_MESSAGE);
        assert_eq!(ScreenError::EmptyQueue.to_string(), EMPTY_QUEUE_MESSAGE);
    }
}
