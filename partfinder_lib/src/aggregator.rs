//! Fan-out search across every registered distributor backend.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;

use crate::config::Settings;
use crate::digikey::DigiKeyDistributor;
use crate::distributor::{ComponentQuery, DistributorClient};
use crate::error::ComponentError;
use crate::model::{DistributorId, GenericComponent, Locale, SearchRequest, SearchResponse};

/// Per-distributor cap used when comparing offers for one part number.
pub const COMPARE_MAX_RESULTS: u32 = 10;

/// What one distributor contributed to a fan-out.
enum SearchOutcome {
    Searched(Vec<GenericComponent>),
    Unavailable,
    Failed(ComponentError),
}

/// Dispatches searches to a fixed, ordered set of distributor backends.
///
/// The registry is built once and never mutated afterwards. A failing
/// backend contributes zero results and is left out of
/// `distributors_searched`; it never fails the whole request.
pub struct Aggregator {
    clients: Vec<Arc<dyn DistributorClient>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Creates an aggregator with no backends.
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Registers a backend. A later registration for the same distributor
    /// replaces the earlier one in place.
    pub fn with_client(mut self, client: Arc<dyn DistributorClient>) -> Self {
        match self.clients.iter().position(|c| c.id() == client.id()) {
            Some(idx) => self.clients[idx] = client,
            None => self.clients.push(client),
        }
        self
    }

    /// Registers every distributor whose credentials are configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ComponentError> {
        Self::from_settings_with_digikey(settings).map(|(aggregator, _)| aggregator)
    }

    /// Like [`Self::from_settings`], also handing back the registered DigiKey
    /// backend so its reference-data endpoints share the same token cache.
    pub fn from_settings_with_digikey(
        settings: &Settings,
    ) -> Result<(Self, Option<Arc<DigiKeyDistributor>>), ComponentError> {
        let mut aggregator = Self::new();
        let digikey = DigiKeyDistributor::from_settings(&settings.digikey)?.map(Arc::new);
        match &digikey {
            Some(backend) => aggregator = aggregator.with_client(backend.clone()),
            None => tracing::info!("DigiKey credentials not configured, skipping"),
        }
        Ok((aggregator, digikey))
    }

    /// Distributors with a registered backend, in registration order.
    pub fn available_distributors(&self) -> Vec<DistributorId> {
        self.clients.iter().map(|c| c.id()).collect()
    }

    fn client(&self, distributor: DistributorId) -> Option<&Arc<dyn DistributorClient>> {
        self.clients.iter().find(|c| c.id() == distributor)
    }

    fn targets(&self, requested: Option<&[DistributorId]>) -> Vec<&Arc<dyn DistributorClient>> {
        match requested {
            Some(ids) if !ids.is_empty() => self
                .clients
                .iter()
                .filter(|c| ids.contains(&c.id()))
                .collect(),
            _ => self.clients.iter().collect(),
        }
    }

    /// Searches every targeted distributor concurrently and merges the results.
    ///
    /// Components are ordered by registration order of their distributor,
    /// then by vendor order. `search_time_ms` spans the whole fan-out.
    pub async fn search_components(&self, request: &SearchRequest) -> SearchResponse {
        let targets = self.targets(request.distributors.as_deref());
        if targets.is_empty() {
            return SearchResponse::empty();
        }

        let started = Instant::now();
        let query = ComponentQuery::from(request);
        let outcomes = join_all(
            targets
                .iter()
                .map(|client| search_one(client, &query)),
        )
        .await;

        let mut components = Vec::new();
        let mut distributors_searched = Vec::new();
        for (client, outcome) in targets.iter().zip(outcomes) {
            match outcome {
                SearchOutcome::Searched(found) => {
                    components.extend(found);
                    distributors_searched.push(client.id());
                }
                SearchOutcome::Unavailable => {
                    tracing::debug!(distributor = %client.id(), "Distributor unavailable, skipped");
                }
                SearchOutcome::Failed(e) => {
                    tracing::warn!(
                        distributor = %client.id(),
                        error = %e,
                        "Distributor search failed"
                    );
                }
            }
        }

        SearchResponse {
            total_count: components.len(),
            components,
            distributors_searched,
            search_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Looks up one part on one distributor.
    ///
    /// `Ok(None)` when the distributor reports the part as unknown.
    /// `Err(Configuration)` when the distributor has no backend. Other
    /// backend errors are returned as-is.
    pub async fn try_get_component_details(
        &self,
        distributor: DistributorId,
        part_number: &str,
        locale: &Locale,
    ) -> Result<Option<GenericComponent>, ComponentError> {
        let client = self.client(distributor).ok_or_else(|| {
            ComponentError::Configuration(format!("{} is not configured", distributor))
        })?;
        match client.get_component_details(part_number, locale).await {
            Ok(component) => Ok(Some(component)),
            Err(ComponentError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Best-effort variant of [`Self::try_get_component_details`]: every
    /// failure, including an unregistered distributor, yields `None`.
    pub async fn get_component_details(
        &self,
        distributor: DistributorId,
        part_number: &str,
        locale: &Locale,
    ) -> Option<GenericComponent> {
        match self
            .try_get_component_details(distributor, part_number, locale)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    distributor = %distributor,
                    part_number,
                    error = %e,
                    "Component detail lookup failed"
                );
                None
            }
        }
    }

    /// Finds offers for one manufacturer part number across distributors.
    ///
    /// Runs a keyword search for the part number (at most
    /// [`COMPARE_MAX_RESULTS`] per distributor) and keeps the components
    /// whose manufacturer part number matches case-insensitively. Matches
    /// ranked below the cap by a distributor's search are missed.
    pub async fn compare_across_distributors(
        &self,
        manufacturer_part_number: &str,
        distributors: Option<Vec<DistributorId>>,
        locale: &Locale,
    ) -> Vec<GenericComponent> {
        let request = SearchRequest::new(manufacturer_part_number)
            .with_distributors(distributors)
            .with_max_results(COMPARE_MAX_RESULTS)
            .with_locale(locale);
        let wanted = manufacturer_part_number.to_lowercase();

        self.search_components(&request)
            .await
            .components
            .into_iter()
            .filter(|c| c.manufacturer_part_number.to_lowercase() == wanted)
            .collect()
    }
}

async fn search_one(
    client: &Arc<dyn DistributorClient>,
    query: &ComponentQuery,
) -> SearchOutcome {
    if !client.is_available() {
        return SearchOutcome::Unavailable;
    }
    match client.search_components(query).await {
        Ok(found) => SearchOutcome::Searched(found),
        Err(e) => SearchOutcome::Failed(e),
    }
}
