//! Error types for the DigiKey API client.

/// Errors that can occur when talking to the DigiKey API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The OAuth2 client-credentials exchange failed.
    #[error("Token exchange failed: {0}")]
    Auth(String),
    /// The API answered 404 for the requested resource.
    #[error("Resource not found")]
    NotFound,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The request exceeded the client's timeout budget.
    #[error("Request timed out")]
    Timeout,
    /// A transport-level failure (connection refused, TLS, invalid URL).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}

impl Error {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::RequestFailed(err.to_string())
        }
    }
}
