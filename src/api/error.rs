use thiserror::Error;

/// Errors that can occur while talking to the marketplace backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup). Nothing was sent.
    #[error("config error: {0}")]
    Config(String),
    /// Transport-level failure (timeout, DNS, connection refused).
    #[error("network error: {0}")]
    Network(String),
    /// Backend answered with a non-success status.
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },
    /// Response body did not match the expected envelope.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The server-supplied message if there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
