use crate::error::ComponentError;
use crate::model::{DistributorId, SearchRequest};

pub const MAX_KEYWORDS_LENGTH: usize = 200;
pub const MAX_PART_NUMBER_LENGTH: usize = 100;
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ComponentError> {
    if input.len() > max_len {
        return Err(ComponentError::Validation(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ComponentError::Validation(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate search keywords: enforce length, strip control chars, trim.
pub fn validate_keywords(input: &str) -> Result<String, ComponentError> {
    sanitize_text(input, MAX_KEYWORDS_LENGTH)
}

/// Validate a distributor or manufacturer part number.
pub fn validate_part_number(input: &str) -> Result<String, ComponentError> {
    sanitize_text(input, MAX_PART_NUMBER_LENGTH)
}

/// Validate the per-distributor result cap (must be 1..=100).
pub fn validate_max_results(max_results: u32) -> Result<u32, ComponentError> {
    if !(1..=MAX_RESULTS_LIMIT).contains(&max_results) {
        return Err(ComponentError::Validation(format!(
            "max_results must be between 1 and {}",
            MAX_RESULTS_LIMIT
        )));
    }
    Ok(max_results)
}

/// Parse a comma-separated distributor list such as `digikey, mouser`.
///
/// Blank tokens are ignored. Returns `None` (every registered distributor)
/// when the list is empty or contains `all`; any unknown name is an error.
pub fn parse_distributor_list(input: &str) -> Result<Option<Vec<DistributorId>>, ComponentError> {
    let mut ids = Vec::new();
    let mut all = false;
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if token.eq_ignore_ascii_case("all") {
            all = true;
            continue;
        }
        let id: DistributorId = token.parse()?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if all || ids.is_empty() {
        Ok(None)
    } else {
        Ok(Some(ids))
    }
}

/// Validate a whole search request, returning it with sanitized keywords.
pub fn validate_search_request(request: SearchRequest) -> Result<SearchRequest, ComponentError> {
    let keywords = validate_keywords(&request.keywords)?;
    let max_results = validate_max_results(request.max_results)?;
    Ok(SearchRequest {
        keywords,
        max_results,
        ..request
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
