//! HTTP response handling and the API's `{success, data, message}` envelope.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response from a serializable value.
    pub fn json_body<T: Serialize>(status: u16, value: &T) -> Result<Self, FetchError> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(Self::new(status, headers, serde_json::to_vec(value)?))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message prefers the envelope's `message` when the body carries one.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = match self.json::<ApiEnvelope<serde_json::Value>>() {
            Ok(ApiEnvelope {
                message: Some(message),
                ..
            }) => message,
            _ => self.text().unwrap_or_default(),
        };
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }

    /// Check the status, parse the envelope and unwrap its `data`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.error_for_status()?.json::<ApiEnvelope<T>>()?.into_result()
    }
}

/// Body shape returned by every storefront endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Turn `success: false` into [`FetchError::Api`] and a missing payload into
    /// [`FetchError::MissingData`].
    pub fn into_result(self) -> Result<T, FetchError> {
        if !self.success {
            return Err(FetchError::Api(
                self.message.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data.ok_or(FetchError::MissingData)
    }
}
