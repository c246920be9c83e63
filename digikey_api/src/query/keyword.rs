//! Request body for the keyword search endpoint.

use serde::Serialize;

/// Hard cap DigiKey enforces on `RecordCount`.
pub const MAX_RECORD_COUNT: u32 = 50;

/// Body of `POST /products/v4/search/keyword`.
///
/// Built with the `with_*` methods; the record count is clamped to
/// [`MAX_RECORD_COUNT`] as it is set.
#[derive(Clone, Debug, Serialize)]
pub struct KeywordSearchRequest {
    #[serde(rename = "Keywords")]
    pub keywords: String,
    #[serde(rename = "RecordCount")]
    pub record_count: u32,
    #[serde(rename = "RecordStartPosition")]
    pub record_start_position: u32,
    #[serde(rename = "FilterOptionsRequest", skip_serializing_if = "Option::is_none")]
    pub filter_options: Option<serde_json::Map<String, serde_json::Value>>,
}

impl KeywordSearchRequest {
    /// Starts a search for `keywords` with the maximum page size at offset 0.
    pub fn new(keywords: &str) -> Self {
        Self {
            keywords: keywords.to_string(),
            record_count: MAX_RECORD_COUNT,
            record_start_position: 0,
            filter_options: None,
        }
    }

    /// Sets the number of records to return, clamped to `1..=MAX_RECORD_COUNT`.
    pub fn with_record_count(mut self, record_count: u32) -> Self {
        self.record_count = record_count.clamp(1, MAX_RECORD_COUNT);
        self
    }

    /// Sets the zero-based position of the first record.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.record_start_position = offset;
        self
    }

    /// Passes vendor filter options through untouched.
    pub fn with_filters(mut self, filters: serde_json::Map<String, serde_json::Value>) -> Self {
        self.filter_options = Some(filters);
        self
    }
}
