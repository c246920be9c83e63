//! Error types for the library layer.

use std::fmt;

/// Errors produced by distributor backends and the aggregator, plus input
/// validation and configuration failures.
#[derive(Debug)]
pub enum ComponentError {
    /// Token acquisition for a distributor failed.
    Auth(String),
    /// The distributor answered with a non-success status other than 404,
    /// or its response could not be used.
    Upstream { status: Option<u16>, message: String },
    /// The distributor reported the requested part as unknown.
    NotFound(String),
    /// The request exceeded its time budget.
    Timeout,
    /// A distributor was requested that has no registered backend.
    Configuration(String),
    /// User-provided input failed validation.
    Validation(String),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(msg) => write!(f, "Authentication error: {}", msg),
            Self::Upstream {
                status: Some(status),
                message,
            } => write!(f, "Upstream error (HTTP {}): {}", status, message),
            Self::Upstream {
                status: None,
                message,
            } => write!(f, "Upstream error: {}", message),
            Self::NotFound(what) => write!(f, "Not found: {}", what),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Self::Validation(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ComponentError {}

impl From<digikey_api::Error> for ComponentError {
    fn from(e: digikey_api::Error) -> Self {
        use digikey_api::Error as Api;
        match e {
            Api::Auth(msg) => Self::Auth(msg),
            Api::NotFound => Self::NotFound("resource not found upstream".to_string()),
            Api::Timeout => Self::Timeout,
            Api::HttpStatus { status, body } => Self::Upstream {
                status: Some(status),
                message: body,
            },
            Api::RequestFailed(msg) | Api::ParseFailed(msg) => Self::Upstream {
                status: None,
                message: msg,
            },
        }
    }
}
