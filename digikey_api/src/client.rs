//! HTTP client for the DigiKey Product Information v4 API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    auth::TokenCache,
    query::{KeywordSearchRequest, Locale},
    types::{CategoriesResponse, KeywordSearchResponse, ManufacturersResponse, ProductRecord},
    Error,
};

/// Production API root.
pub const PRODUCTION_URL: &str = "https://api.digikey.com";

/// Sandbox API root.
pub const SANDBOX_URL: &str = "https://sandbox-api.digikey.com";

/// Per-request budget applied to every call, token exchange included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION: &str = "v4";

/// OAuth2 client-credentials pair issued by the DigiKey developer portal.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }
}

/// HTTP client for the DigiKey product API.
///
/// Owns a [`TokenCache`], so every request carries a fresh bearer token
/// without callers having to manage the OAuth2 exchange. One
/// `reqwest::Client` is shared by the token exchange and the product calls.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    tokens: TokenCache,
}

impl Client {
    /// Creates a client pointing at the production API.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_base_url(PRODUCTION_URL, credentials)
    }

    /// Creates a client with a custom base URL. Used for the sandbox and for
    /// testing with wiremock.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::with_timeout(base_url, credentials, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom base URL and request timeout.
    pub fn with_timeout(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let tokens = TokenCache::new(
            http.clone(),
            &base_url,
            &credentials.client_id,
            &credentials.client_secret,
        );
        Ok(Self {
            http,
            base_url,
            client_id: credentials.client_id,
            tokens,
        })
    }

    /// The token cache backing this client.
    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_url, e);
            Error::RequestFailed(e.to_string())
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::RequestFailed(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn headers(&self, locale: &Locale) -> Result<HeaderMap, Error> {
        let token = self.tokens.get_token().await?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
        let pairs = [
            ("x-digikey-client-id", self.client_id.as_str()),
            ("x-digikey-locale-language", locale.language.as_str()),
            ("x-digikey-locale-currency", locale.currency.as_str()),
            ("x-digikey-locale-site", locale.site.as_str()),
        ];
        for (name, value) in pairs {
            headers.insert(HeaderName::from_static(name), header_value(value)?);
        }
        Ok(headers)
    }

    async fn execute<T>(&self, request: RequestBuilder, locale: &Locale) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let headers = self.headers(locale).await?;
        let resp = request
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach DigiKey: {}", e);
                Error::from_transport(e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::from_transport(e)
        })?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }
        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }

    /// Runs a keyword search.
    pub async fn search_keyword(
        &self,
        request: &KeywordSearchRequest,
        locale: &Locale,
    ) -> Result<KeywordSearchResponse, Error> {
        let url = self.endpoint(&["products", API_VERSION, "search", "keyword"])?;
        self.execute(self.http.post(url).json(request), locale).await
    }

    /// Fetches one product by its DigiKey part number.
    ///
    /// Returns [`Error::NotFound`] when DigiKey does not know the part.
    pub async fn product_details(
        &self,
        part_number: &str,
        locale: &Locale,
    ) -> Result<ProductRecord, Error> {
        let url = self.endpoint(&[
            "products",
            API_VERSION,
            "search",
            part_number,
            "productdetails",
        ])?;
        self.execute(self.http.get(url), locale).await
    }

    /// Lists every manufacturer DigiKey carries.
    pub async fn manufacturers(&self, locale: &Locale) -> Result<ManufacturersResponse, Error> {
        let url = self.endpoint(&["products", API_VERSION, "search", "manufacturers"])?;
        self.execute(self.http.get(url), &locale.unpriced()).await
    }

    /// Lists the product category tree.
    pub async fn categories(&self, locale: &Locale) -> Result<CategoriesResponse, Error> {
        let url = self.endpoint(&["products", API_VERSION, "search", "categories"])?;
        self.execute(self.http.get(url), &locale.unpriced()).await
    }

    /// Fetches one category, returned as DigiKey sent it.
    pub async fn category(
        &self,
        category_id: i64,
        locale: &Locale,
    ) -> Result<serde_json::Value, Error> {
        let id = category_id.to_string();
        let url = self.endpoint(&["products", API_VERSION, "search", "categories", &id])?;
        self.execute(self.http.get(url), &locale.unpriced()).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::RequestFailed(format!("invalid header value '{}'", value)))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::with_base_url(base, Credentials::new("id", "secret")).unwrap()
    }

    #[test]
    fn endpoint_joins_segments() {
        let url = client("https://api.digikey.com")
            .endpoint(&["products", "v4", "search", "keyword"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.digikey.com/products/v4/search/keyword");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let url = client("https://sandbox-api.digikey.com/")
            .endpoint(&["products", "v4", "search", "categories"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sandbox-api.digikey.com/products/v4/search/categories"
        );
    }

    #[test]
    fn endpoint_escapes_part_numbers() {
        let url = client("https://api.digikey.com")
            .endpoint(&["products", "v4", "search", "ABC/1 2#", "productdetails"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.digikey.com/products/v4/search/ABC%2F1%202%23/productdetails"
        );
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(1500);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= 2000 + "...[truncated]".len());
    }
}
