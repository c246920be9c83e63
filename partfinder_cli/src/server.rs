//! HTTP surface over the aggregator.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use partfinder_lib::digikey_api::types::{CategoriesResponse, ManufacturersResponse};
use partfinder_lib::validation::{
    parse_distributor_list, validate_part_number, validate_search_request,
};
use partfinder_lib::{
    Aggregator, ComponentError, DigiKeyDistributor, DistributorId, GenericComponent, Locale,
    SearchRequest, SearchResponse, Settings,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    /// Kept apart from the aggregator for the DigiKey-only listing routes.
    /// Shares its token cache with the registered backend.
    pub digikey: Option<Arc<DigiKeyDistributor>>,
    pub app_name: String,
    pub app_version: String,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, ComponentError> {
        let (aggregator, digikey) = Aggregator::from_settings_with_digikey(settings)?;
        if aggregator.available_distributors().is_empty() {
            tracing::warn!("No distributor credentials configured");
        }
        Ok(Self {
            aggregator: Arc::new(aggregator),
            digikey,
            app_name: settings.app_name.clone(),
            app_version: settings.app_version.clone(),
        })
    }
}

/// Error response with a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    fn bad_request(e: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl From<ComponentError> for ApiError {
    fn from(e: ComponentError) -> Self {
        let status = match &e {
            ComponentError::Validation(_) => StatusCode::BAD_REQUEST,
            ComponentError::NotFound(_) => StatusCode::NOT_FOUND,
            ComponentError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), detail = %self.detail, "Request failed");
        }
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

fn default_language() -> String {
    Locale::default().language
}

fn default_currency() -> String {
    Locale::default().currency
}

fn default_site() -> String {
    Locale::default().site
}

fn default_max_results() -> u32 {
    partfinder_lib::model::DEFAULT_MAX_RESULTS
}

#[derive(Debug, Deserialize)]
struct LocaleParams {
    #[serde(default = "default_language")]
    locale_language: String,
    #[serde(default = "default_currency")]
    locale_currency: String,
    #[serde(default = "default_site")]
    locale_site: String,
}

impl From<LocaleParams> for Locale {
    fn from(p: LocaleParams) -> Self {
        Locale::new(&p.locale_language, &p.locale_currency, &p.locale_site)
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    keywords: String,
    distributors: Option<String>,
    #[serde(default = "default_max_results")]
    max_results: u32,
    #[serde(default)]
    offset: u32,
    #[serde(default = "default_language")]
    locale_language: String,
    #[serde(default = "default_currency")]
    locale_currency: String,
    #[serde(default = "default_site")]
    locale_site: String,
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    distributors: Option<String>,
    #[serde(flatten)]
    locale: LocaleParams,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/components/distributors", get(list_distributors))
        .route("/components/search", get(search_query).post(search_body))
        .route(
            "/components/compare/{manufacturer_part_number}",
            get(compare_component),
        )
        .route(
            "/components/{distributor}/{part_number}",
            get(component_details),
        )
        .route("/digikey/manufacturers", get(digikey_manufacturers))
        .route("/digikey/categories", get(digikey_categories))
        .route("/digikey/categories/{category_id}", get(digikey_category))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    tracing::info!(
        distributors = ?state.aggregator.available_distributors(),
        "Registered distributors"
    );

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        "{} {} listening on {}",
        settings.app_name,
        settings.app_version,
        settings.bind_addr
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.app_name,
        "version": state.app_version,
        "endpoints": {
            "search": "/components/search",
            "compare": "/components/compare/{manufacturer_part_number}",
            "details": "/components/{distributor}/{part_number}",
            "distributors": "/components/distributors",
            "manufacturers": "/digikey/manufacturers",
            "categories": "/digikey/categories",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_distributors(State(state): State<AppState>) -> Json<Vec<DistributorId>> {
    Json(state.aggregator.available_distributors())
}

async fn search_body(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(ApiError::bad_request)?;
    let request = validate_search_request(request)?;
    Ok(Json(state.aggregator.search_components(&request).await))
}

async fn search_query(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(ApiError::bad_request)?;
    let distributors = parse_distributor_list(params.distributors.as_deref().unwrap_or(""))?;
    let locale = Locale::new(
        &params.locale_language,
        &params.locale_currency,
        &params.locale_site,
    );
    let request = SearchRequest::new(&params.keywords)
        .with_distributors(distributors)
        .with_max_results(params.max_results)
        .with_offset(params.offset)
        .with_locale(&locale);
    let request = validate_search_request(request)?;
    Ok(Json(state.aggregator.search_components(&request).await))
}

async fn component_details(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    locale: Result<Query<LocaleParams>, QueryRejection>,
) -> Result<Json<GenericComponent>, ApiError> {
    let Path((distributor, part_number)) = path.map_err(ApiError::bad_request)?;
    let Query(locale) = locale.map_err(ApiError::bad_request)?;
    let distributor: DistributorId = distributor.parse()?;
    let part_number = validate_part_number(&part_number)?;
    state
        .aggregator
        .try_get_component_details(distributor, &part_number, &locale.into())
        .await?
        .map(Json)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::NOT_FOUND,
                format!("Component not found in {}", distributor),
            )
        })
}

async fn compare_component(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    params: Result<Query<CompareParams>, QueryRejection>,
) -> Result<Json<Vec<GenericComponent>>, ApiError> {
    let Path(manufacturer_part_number) = path.map_err(ApiError::bad_request)?;
    let Query(params) = params.map_err(ApiError::bad_request)?;
    let mpn = validate_part_number(&manufacturer_part_number)?;
    let distributors = parse_distributor_list(params.distributors.as_deref().unwrap_or(""))?;
    let matches = state
        .aggregator
        .compare_across_distributors(&mpn, distributors, &params.locale.into())
        .await;
    if matches.is_empty() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Component {} not found in any distributor", mpn),
        ));
    }
    Ok(Json(matches))
}

fn digikey(state: &AppState) -> Result<&DigiKeyDistributor, ApiError> {
    state.digikey.as_deref().ok_or_else(|| {
        ApiError::from(ComponentError::Configuration(
            "DigiKey is not configured".to_string(),
        ))
    })
}

async fn digikey_manufacturers(
    State(state): State<AppState>,
    locale: Result<Query<LocaleParams>, QueryRejection>,
) -> Result<Json<ManufacturersResponse>, ApiError> {
    let Query(locale) = locale.map_err(ApiError::bad_request)?;
    let backend = digikey(&state)?;
    Ok(Json(backend.manufacturers(&locale.into()).await?))
}

async fn digikey_categories(
    State(state): State<AppState>,
    locale: Result<Query<LocaleParams>, QueryRejection>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let Query(locale) = locale.map_err(ApiError::bad_request)?;
    let backend = digikey(&state)?;
    Ok(Json(backend.categories(&locale.into()).await?))
}

async fn digikey_category(
    State(state): State<AppState>,
    category_id: Result<Path<i64>, PathRejection>,
    locale: Result<Query<LocaleParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(category_id) = category_id.map_err(ApiError::bad_request)?;
    let Query(locale) = locale.map_err(ApiError::bad_request)?;
    let backend = digikey(&state)?;
    Ok(Json(backend.category(category_id, &locale.into()).await?))
}
