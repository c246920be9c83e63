//! The capability set every distributor backend provides.

use async_trait::async_trait;

use crate::error::ComponentError;
use crate::model::{DistributorId, GenericComponent, Locale, SearchRequest};

/// One distributor's share of a search.
#[derive(Clone, Debug)]
pub struct ComponentQuery {
    pub keywords: String,
    /// Requested cap. Backends clamp this to their own hard limit.
    pub max_results: u32,
    pub offset: u32,
    pub filters: Option<serde_json::Map<String, serde_json::Value>>,
    pub locale: Locale,
}

impl ComponentQuery {
    pub fn new(keywords: &str) -> Self {
        Self {
            keywords: keywords.to_string(),
            max_results: crate::model::DEFAULT_MAX_RESULTS,
            offset: 0,
            filters: None,
            locale: Locale::default(),
        }
    }
}

impl From<&SearchRequest> for ComponentQuery {
    fn from(request: &SearchRequest) -> Self {
        Self {
            keywords: request.keywords.clone(),
            max_results: request.max_results,
            offset: request.offset,
            filters: request.filters.clone(),
            locale: request.locale(),
        }
    }
}

/// A distributor backend.
///
/// Implementations wrap one vendor's API and return results already
/// normalized to [`GenericComponent`]. The aggregator only ever sees this
/// trait, so adding a distributor means adding an implementation and
/// registering it.
#[async_trait]
pub trait DistributorClient: Send + Sync {
    /// Registry key for this backend.
    fn id(&self) -> DistributorId;

    /// Human-readable name, used as `GenericComponent::distributor`.
    fn distributor_name(&self) -> &str;

    /// True iff the backend has the credentials it needs. Makes no network calls.
    fn is_available(&self) -> bool;

    /// Keyword search.
    ///
    /// Fails with `Upstream` on a non-success vendor response, `Auth` if no
    /// token could be obtained, and `Timeout` when the request budget runs out.
    async fn search_components(
        &self,
        query: &ComponentQuery,
    ) -> Result<Vec<GenericComponent>, ComponentError>;

    /// Looks up one part by the distributor's own part number.
    ///
    /// Fails with `NotFound` when the vendor does not know the part.
    async fn get_component_details(
        &self,
        part_number: &str,
        locale: &Locale,
    ) -> Result<GenericComponent, ComponentError>;
}
