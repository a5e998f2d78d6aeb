//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The API answered with `success: false`.
    #[error("{0}")]
    Api(String),

    /// The API reported success but carried no `data` payload.
    #[error("Response contained no data")]
    MissingData,
}

impl FetchError {
    /// Message suitable for showing to a shopper.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Api(message) => message.clone(),
            FetchError::HttpError { message, .. } if !message.is_empty() => message.clone(),
            FetchError::HttpError { status, .. } => {
                format!("Request failed with status {}", status)
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}
