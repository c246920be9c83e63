use serde::{Deserialize, Serialize};

use super::ProductRecord;

/// Response of `POST /products/v4/search/keyword`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeywordSearchResponse {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub products_count: i64,
    #[serde(default)]
    pub exact_manufacturer_products_count: i64,
    #[serde(default)]
    pub exact_digi_key_products_count: i64,
}
