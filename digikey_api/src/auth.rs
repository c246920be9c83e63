//! OAuth2 client-credentials token cache.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::{types::TokenResponse, Error};

/// Tokens expiring within this many seconds are treated as already expired.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 300;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// A bearer token and the instant it stops being accepted.
#[derive(Clone, Debug)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// True if the token is still usable at `now`, honouring the safety margin.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Lazily refreshed bearer token for one set of client credentials.
///
/// Reads of a valid token only take a shared lock. Refreshes are serialized
/// behind an async mutex: a caller that finds the token stale waits for the
/// refresh lock, then re-checks the cache before issuing its own exchange, so
/// any number of concurrent callers produce a single token request.
pub struct TokenCache {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    current: RwLock<Option<AuthToken>>,
    refresh: Mutex<()>,
}

impl TokenCache {
    /// Creates an empty cache that exchanges credentials at `{base_url}/v1/oauth2/token`.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}/v1/oauth2/token", base_url.trim_end_matches('/')),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Returns a bearer token that is valid for at least the safety margin,
    /// refreshing it first if needed.
    pub async fn get_token(&self) -> Result<String, Error> {
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let _guard = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let token = self.exchange().await?;
        let access_token = token.access_token.clone();
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
        Ok(access_token)
    }

    /// Checks the cached token against the safety margin. Never refreshes.
    pub fn is_token_valid(&self) -> bool {
        self.cached().is_some()
    }

    /// Snapshot of the cached token, valid or not.
    pub fn current(&self) -> Option<AuthToken> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn cached(&self) -> Option<String> {
        let now = Utc::now();
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.access_token.clone())
    }

    async fn exchange(&self) -> Result<AuthToken, Error> {
        tracing::debug!("Refreshing DigiKey access token");
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];
        let resp = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Token request failed: {}", e);
                Error::Auth(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Auth(e.to_string()))?;
        if !status.is_success() {
            tracing::error!("Token endpoint returned {}", status);
            return Err(Error::Auth(format!("token endpoint returned {}", status)));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Auth(format!("malformed token response: {}", e)))?;
        let expires_in = parsed.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| Error::Auth(format!("invalid expires_in {}", expires_in)))?;
        Ok(AuthToken {
            access_token: parsed.access_token,
            expires_at,
        })
    }
}
