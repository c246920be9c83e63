//! Distributor-agnostic data model shared by every backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

/// Distributors the gateway knows how to name.
///
/// Only backends with credentials are ever registered; naming a distributor
/// here does not imply a backend exists for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributorId {
    DigiKey,
    Mouser,
    Farnell,
}

impl DistributorId {
    pub const ALL: [DistributorId; 3] = [
        DistributorId::DigiKey,
        DistributorId::Mouser,
        DistributorId::Farnell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistributorId::DigiKey => "digikey",
            DistributorId::Mouser => "mouser",
            DistributorId::Farnell => "farnell",
        }
    }
}

impl fmt::Display for DistributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributorId {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DistributorId::ALL
            .into_iter()
            .find(|id| id.as_str() == lower)
            .ok_or_else(|| {
                ComponentError::Validation(format!(
                    "unknown distributor '{}'. Valid values: digikey, mouser, farnell",
                    s.trim()
                ))
            })
    }
}

/// Language, currency and site a distributor should localize its answer to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub language: String,
    pub currency: String,
    pub site: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: default_language(),
            currency: default_currency(),
            site: default_site(),
        }
    }
}

impl Locale {
    pub fn new(language: &str, currency: &str, site: &str) -> Self {
        Self {
            language: language.to_string(),
            currency: currency.to_string(),
            site: site.to_string(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_site() -> String {
    "US".to_string()
}

/// One quantity tier. `total_price` is `quantity * unit_price` as quoted by the vendor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceBreak {
    pub quantity: u64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// A vendor-defined attribute. Names are not unique within a component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentParameter {
    pub name: String,
    pub value: String,
    pub unit: Option<String>,
}

/// A part as offered by one distributor, in the normalized schema.
///
/// Every field is always serialized; absent optional values appear as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericComponent {
    pub distributor: String,
    pub distributor_part_number: String,
    pub manufacturer: String,
    pub manufacturer_part_number: String,
    pub description: String,
    pub detailed_description: Option<String>,
    pub quantity_available: u64,
    pub minimum_order_quantity: u64,
    pub unit_price: Option<f64>,
    /// Ascending by quantity.
    pub price_breaks: Vec<PriceBreak>,
    pub datasheet_url: Option<String>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
    pub parameters: Vec<ComponentParameter>,
    pub packaging: Option<String>,
    pub series: Option<String>,
    pub product_status: Option<String>,
    pub rohs_status: Option<String>,
    pub lifecycle_status: Option<String>,
    /// The vendor payload exactly as received.
    pub raw_data: serde_json::Value,
}

impl GenericComponent {
    /// Unit price that applies when ordering `quantity` pieces: the largest
    /// price break not above `quantity`, falling back to `unit_price`.
    pub fn unit_price_at(&self, quantity: u64) -> Option<f64> {
        self.price_breaks
            .iter()
            .rev()
            .find(|pb| pb.quantity <= quantity)
            .map(|pb| pb.unit_price)
            .or(self.unit_price)
    }
}

/// A normalized search across one or more distributors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keywords: String,
    /// `None` or empty means every registered distributor.
    #[serde(default)]
    pub distributors: Option<Vec<DistributorId>>,
    /// Per distributor. Backends clamp further to their own cap.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default)]
    pub offset: u32,
    /// Passed to each backend untouched.
    #[serde(default)]
    pub filters: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default = "default_language")]
    pub locale_language: String,
    #[serde(default = "default_currency")]
    pub locale_currency: String,
    #[serde(default = "default_site")]
    pub locale_site: String,
}

pub const DEFAULT_MAX_RESULTS: u32 = 50;

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl SearchRequest {
    pub fn new(keywords: &str) -> Self {
        Self {
            keywords: keywords.to_string(),
            distributors: None,
            max_results: DEFAULT_MAX_RESULTS,
            offset: 0,
            filters: None,
            locale_language: default_language(),
            locale_currency: default_currency(),
            locale_site: default_site(),
        }
    }

    pub fn with_distributors(mut self, distributors: Option<Vec<DistributorId>>) -> Self {
        self.distributors = distributors;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filters(mut self, filters: serde_json::Map<String, serde_json::Value>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_locale(mut self, locale: &Locale) -> Self {
        self.locale_language = locale.language.clone();
        self.locale_currency = locale.currency.clone();
        self.locale_site = locale.site.clone();
        self
    }

    pub fn locale(&self) -> Locale {
        Locale::new(&self.locale_language, &self.locale_currency, &self.locale_site)
    }
}

/// Merged result of a fan-out search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Registration order of distributors, then vendor order within each.
    pub components: Vec<GenericComponent>,
    pub total_count: usize,
    /// Distributors whose call completed without error, even with zero hits.
    pub distributors_searched: Vec<DistributorId>,
    pub search_time_ms: f64,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self {
            components: Vec::new(),
            total_count: 0,
            distributors_searched: Vec::new(),
            search_time_ms: 0.0,
        }
    }
}

/// Offers for one manufacturer part number across distributors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributorAvailability {
    pub manufacturer_part_number: String,
    pub distributors: Vec<GenericComponent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component_with_breaks(breaks: &[(u64, f64)], unit_price: Option<f64>) -> GenericComponent {
        GenericComponent {
            distributor: "DigiKey".to_string(),
            distributor_part_number: "1-ND".to_string(),
            manufacturer: String::new(),
            manufacturer_part_number: "X".to_string(),
            description: String::new(),
            detailed_description: None,
            quantity_available: 0,
            minimum_order_quantity: 1,
            unit_price,
            price_breaks: breaks
                .iter()
                .map(|&(quantity, unit_price)| PriceBreak {
                    quantity,
                    unit_price,
                    total_price: quantity as f64 * unit_price,
                })
                .collect(),
            datasheet_url: None,
            product_url: None,
            image_url: None,
            parameters: Vec::new(),
            packaging: None,
            series: None,
            product_status: None,
            rohs_status: None,
            lifecycle_status: None,
            raw_data: serde_json::json!({}),
        }
    }

    #[test]
    fn distributor_id_parses_case_insensitively() {
        assert_eq!("DigiKey".parse::<DistributorId>().unwrap(), DistributorId::DigiKey);
        assert_eq!(" MOUSER ".parse::<DistributorId>().unwrap(), DistributorId::Mouser);
        assert!(matches!(
            "arrow".parse::<DistributorId>(),
            Err(ComponentError::Validation(_))
        ));
    }

    #[test]
    fn distributor_id_serializes_lowercase() {
        let json = serde_json::to_string(&vec![DistributorId::DigiKey, DistributorId::Farnell])
            .unwrap();
        assert_eq!(json, r#"["digikey","farnell"]"#);
    }

    #[test]
    fn search_request_defaults_from_json() {
        let req: SearchRequest = serde_json::from_str(r#"{"keywords": "STM32F103"}"#).unwrap();
        assert_eq!(req.max_results, 50);
        assert_eq!(req.offset, 0);
        assert!(req.distributors.is_none());
        assert_eq!(req.locale(), Locale::default());
    }

    #[test]
    fn search_request_rejects_unknown_distributor() {
        let result: Result<SearchRequest, _> =
            serde_json::from_str(r#"{"keywords": "x", "distributors": ["arrow"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn generic_component_serializes_nulls() {
        let json = serde_json::to_value(component_with_breaks(&[], None)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("unit_price"));
        assert!(obj["unit_price"].is_null());
        assert!(obj["datasheet_url"].is_null());
        assert!(obj["lifecycle_status"].is_null());
    }

    #[test]
    fn unit_price_at_picks_applicable_break() {
        let c = component_with_breaks(&[(1, 1.0), (10, 0.8), (100, 0.5)], Some(1.0));
        assert_eq!(c.unit_price_at(1), Some(1.0));
        assert_eq!(c.unit_price_at(50), Some(0.8));
        assert_eq!(c.unit_price_at(1000), Some(0.5));
    }

    #[test]
    fn unit_price_at_falls_back_to_flat_price() {
        let c = component_with_breaks(&[], Some(2.5));
        assert_eq!(c.unit_price_at(10), Some(2.5));
        let c = component_with_breaks(&[(10, 0.8)], None);
        assert_eq!(c.unit_price_at(5), None);
    }
}
