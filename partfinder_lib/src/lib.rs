//! Library layer for Part Finder: a normalized component search over
//! electronic-component distributors.
//!
//! Each distributor backend implements [`DistributorClient`]; the
//! [`Aggregator`] fans one query out to every registered backend, merges the
//! normalized [`GenericComponent`]s, and tolerates per-distributor failures.

pub mod aggregator;
pub mod config;
pub mod digikey;
pub mod distributor;
pub mod error;
pub mod model;
pub mod normalize;
pub mod validation;

pub use digikey_api;

pub use aggregator::Aggregator;
pub use config::{DigiKeySettings, Settings, SettingsError};
pub use digikey::DigiKeyDistributor;
pub use distributor::{ComponentQuery, DistributorClient};
pub use error::ComponentError;
pub use model::{
    ComponentParameter, DistributorAvailability, DistributorId, GenericComponent, Locale,
    PriceBreak, SearchRequest, SearchResponse,
};
