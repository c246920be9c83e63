//! Locale triple sent with every DigiKey request.

/// Language, currency and site that govern localized DigiKey responses.
///
/// Sent as the `X-DIGIKEY-Locale-*` headers. Defaults to `en` / `USD` / `US`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
    pub currency: String,
    pub site: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            currency: "USD".to_string(),
            site: "US".to_string(),
        }
    }
}

impl Locale {
    /// Creates a locale from its three parts.
    pub fn new(language: &str, currency: &str, site: &str) -> Self {
        Self {
            language: language.to_string(),
            currency: currency.to_string(),
            site: site.to_string(),
        }
    }

    /// Same language and site, with the currency forced to USD. The listing
    /// endpoints (manufacturers, categories) are not priced.
    pub fn unpriced(&self) -> Self {
        Self {
            language: self.language.clone(),
            currency: "USD".to_string(),
            site: self.site.clone(),
        }
    }
}
