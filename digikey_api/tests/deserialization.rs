use digikey_api::types::{
    CategoriesResponse, KeywordSearchResponse, ManufacturersResponse, ProductRecord,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_keyword_search_full() {
    let json = load_fixture("keyword_search.json");
    let resp: KeywordSearchResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.products.len(), 2);
    assert_eq!(resp.exact_manufacturer_products_count, 1);

    let mcu = &resp.products[0].product;
    assert_eq!(mcu.manufacturer_part_number, "STM32F103C8T6");
    assert_eq!(mcu.manufacturer.as_deref(), Some("STMicroelectronics"));
    assert_eq!(mcu.quantity_available, 10342);
    assert_eq!(mcu.unit_price, Some(7.12));
    let breaks = &mcu.standard_pricing.as_ref().unwrap().price_breaks;
    assert_eq!(breaks.len(), 3);
    assert_eq!(breaks[1].break_quantity, 10);
    assert_eq!(mcu.parameters[0].parameter, "Core Processor");
    assert_eq!(mcu.media_links[0].media_type.as_deref(), Some("Datasheets"));
    assert_eq!(mcu.rohs_status.as_deref(), Some("ROHS3 Compliant"));
    assert!(mcu.primary_video.is_none());
}

#[test]
fn sparse_product_gets_defaults() {
    let json = load_fixture("keyword_search.json");
    let resp: KeywordSearchResponse = serde_json::from_str(&json).unwrap();

    let sparse = &resp.products[1].product;
    assert_eq!(sparse.minimum_order_quantity, 1);
    assert!(sparse.standard_pricing.is_none());
    assert!(sparse.parameters.is_empty());
    assert!(sparse.detailed_description.is_none());
}

#[test]
fn empty_search_response() {
    let resp: KeywordSearchResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.products.is_empty());
    assert_eq!(resp.products_count, 0);
}

#[test]
fn product_record_keeps_unmodelled_fields() {
    let json = load_fixture("keyword_search.json");
    let original: serde_json::Value = serde_json::from_str(&json).unwrap();
    let resp: KeywordSearchResponse = serde_json::from_str(&json).unwrap();

    let record = &resp.products[0];
    assert_eq!(record.raw["LeadStatus"], "Lead free");
    assert_eq!(record.raw, original["Products"][0]);

    let reserialized = serde_json::to_value(record).unwrap();
    assert_eq!(reserialized, original["Products"][0]);
}

#[test]
fn product_record_rejects_missing_part_number() {
    let result: Result<ProductRecord, _> =
        serde_json::from_str(r#"{"ManufacturerPartNumber": "X"}"#);
    assert!(result.is_err());
}

#[test]
fn deserialize_listings() {
    let manufacturers: ManufacturersResponse =
        serde_json::from_str(&load_fixture("manufacturers.json")).unwrap();
    assert_eq!(manufacturers.manufacturers[1].name, "Texas Instruments");

    let categories: CategoriesResponse =
        serde_json::from_str(&load_fixture("categories.json")).unwrap();
    assert_eq!(categories.categories[0].parent_id, None);
    assert_eq!(categories.categories[1].parent_id, Some(32));
}
