mod auth;
mod client;
mod errors;
mod query;
pub mod types;
pub use self::auth::{AuthToken, TokenCache, TOKEN_EXPIRY_MARGIN_SECS};
pub use self::client::{
    Client, Credentials, DEFAULT_TIMEOUT, PRODUCTION_URL, SANDBOX_URL,
};
pub use self::errors::Error;
pub use self::query::{KeywordSearchRequest, Locale, MAX_RECORD_COUNT};
