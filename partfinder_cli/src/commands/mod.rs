//! CLI subcommand implementations.

use clap::Args;
use partfinder_lib::Locale;

pub mod compare;
pub mod details;
pub mod digikey;
pub mod distributors;
pub mod search;
pub mod serve;

/// Locale flags shared by every command that talks to a distributor.
#[derive(Args, Clone, Debug)]
pub struct LocaleArgs {
    /// Response language (e.g. en, de, fr)
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Pricing currency (e.g. USD, EUR)
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Distributor site (e.g. US, DE, UK)
    #[arg(long, default_value = "US")]
    pub site: String,
}

impl LocaleArgs {
    pub fn locale(&self) -> Locale {
        Locale::new(&self.language, &self.currency, &self.site)
    }
}
