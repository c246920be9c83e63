use serde::Deserialize;

/// Body returned by the OAuth2 token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds. Missing on some sandbox responses.
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}
