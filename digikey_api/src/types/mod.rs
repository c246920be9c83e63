mod product;
pub use self::product::{
    MediaLink, ParameterValue, PriceBreak, Product, ProductRecord, StandardPricing,
};

mod search;
pub use self::search::KeywordSearchResponse;

mod taxonomy;
pub use self::taxonomy::{Category, CategoriesResponse, Manufacturer, ManufacturersResponse};

mod token;
pub use self::token::TokenResponse;
