//! Product records returned by the search and details endpoints.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One quantity tier of DigiKey's standard pricing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceBreak {
    pub break_quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardPricing {
    #[serde(default)]
    pub price_breaks: Vec<PriceBreak>,
}

/// A named electrical or mechanical attribute.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterValue {
    pub parameter: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaLink {
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// A DigiKey product as it appears in search and details responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub digi_key_part_number: String,
    pub manufacturer_part_number: String,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub quantity_available: i64,
    #[serde(default = "default_minimum_order_quantity")]
    pub minimum_order_quantity: i64,
    pub packaging: Option<String>,
    pub series: Option<String>,
    pub product_status: Option<String>,
    /// Flat price, present on some records that lack standard pricing.
    pub unit_price: Option<f64>,
    pub standard_pricing: Option<StandardPricing>,
    pub manufacturer_public_quantity: Option<i64>,
    #[serde(default)]
    pub parameters: Vec<ParameterValue>,
    #[serde(default)]
    pub media_links: Vec<MediaLink>,
    pub primary_datasheet: Option<String>,
    pub primary_photo: Option<String>,
    pub primary_video: Option<String>,
    pub rohs_status: Option<String>,
}

fn default_minimum_order_quantity() -> i64 {
    1
}

/// A typed [`Product`] paired with the exact JSON object it was decoded from.
///
/// Serializes back to the original JSON, so fields DigiKey adds that
/// [`Product`] does not model are never lost.
#[derive(Clone, Debug)]
pub struct ProductRecord {
    pub product: Product,
    pub raw: serde_json::Value,
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let product = Product::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self { product, raw })
    }
}

impl Serialize for ProductRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}
