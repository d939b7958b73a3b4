//! Error handling for the backend API module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The body could not be decoded into the expected JSON shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// Whether the failure happened before a usable reply was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Reqwest(_) | ApiError::Decode(_))
    }
}
