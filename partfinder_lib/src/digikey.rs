//! DigiKey backend: wraps the wire client and normalizes its products.

use async_trait::async_trait;
use digikey_api::types::{CategoriesResponse, ManufacturersResponse};
use digikey_api::{Client, Credentials, KeywordSearchRequest};

use crate::config::DigiKeySettings;
use crate::distributor::{ComponentQuery, DistributorClient};
use crate::error::ComponentError;
use crate::model::{DistributorId, GenericComponent, Locale};
use crate::normalize::{normalize_digikey, DIGIKEY_NAME};

impl From<&Locale> for digikey_api::Locale {
    fn from(locale: &Locale) -> Self {
        digikey_api::Locale::new(&locale.language, &locale.currency, &locale.site)
    }
}

/// [`DistributorClient`] for DigiKey.
pub struct DigiKeyDistributor {
    client: Client,
    credentials: Credentials,
}

impl DigiKeyDistributor {
    /// Wraps an already-built client.
    pub fn new(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Builds the backend from settings. Returns `Ok(None)` when the
    /// credential pair is not configured.
    pub fn from_settings(settings: &DigiKeySettings) -> Result<Option<Self>, ComponentError> {
        let Some(credentials) = settings.credentials() else {
            return Ok(None);
        };
        let client =
            Client::with_timeout(settings.base_url(), credentials.clone(), settings.timeout)?;
        Ok(Some(Self::new(client, credentials)))
    }

    /// The underlying wire client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Lists DigiKey manufacturers.
    pub async fn manufacturers(
        &self,
        locale: &Locale,
    ) -> Result<ManufacturersResponse, ComponentError> {
        Ok(self.client.manufacturers(&locale.into()).await?)
    }

    /// Lists DigiKey product categories.
    pub async fn categories(&self, locale: &Locale) -> Result<CategoriesResponse, ComponentError> {
        Ok(self.client.categories(&locale.into()).await?)
    }

    /// Fetches one category as raw JSON.
    pub async fn category(
        &self,
        category_id: i64,
        locale: &Locale,
    ) -> Result<serde_json::Value, ComponentError> {
        self.client
            .category(category_id, &locale.into())
            .await
            .map_err(|e| match e {
                digikey_api::Error::NotFound => {
                    ComponentError::NotFound(format!("category {}", category_id))
                }
                other => other.into(),
            })
    }
}

#[async_trait]
impl DistributorClient for DigiKeyDistributor {
    fn id(&self) -> DistributorId {
        DistributorId::DigiKey
    }

    fn distributor_name(&self) -> &str {
        DIGIKEY_NAME
    }

    fn is_available(&self) -> bool {
        !self.credentials.client_id.is_empty() && !self.credentials.client_secret.is_empty()
    }

    async fn search_components(
        &self,
        query: &ComponentQuery,
    ) -> Result<Vec<GenericComponent>, ComponentError> {
        let mut request = KeywordSearchRequest::new(&query.keywords)
            .with_record_count(query.max_results)
            .with_offset(query.offset);
        if let Some(filters) = &query.filters {
            request = request.with_filters(filters.clone());
        }

        let resp = self
            .client
            .search_keyword(&request, &(&query.locale).into())
            .await?;
        Ok(resp.products.iter().map(normalize_digikey).collect())
    }

    async fn get_component_details(
        &self,
        part_number: &str,
        locale: &Locale,
    ) -> Result<GenericComponent, ComponentError> {
        let record = self
            .client
            .product_details(part_number, &locale.into())
            .await
            .map_err(|e| match e {
                digikey_api::Error::NotFound => {
                    ComponentError::NotFound(format!("{} on DigiKey", part_number))
                }
                other => other.into(),
            })?;
        Ok(normalize_digikey(&record))
    }
}
