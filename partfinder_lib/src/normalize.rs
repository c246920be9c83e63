//! Vendor schema to [`GenericComponent`] mapping.

use digikey_api::types::ProductRecord;

use crate::model::{ComponentParameter, GenericComponent, PriceBreak};

pub const DIGIKEY_NAME: &str = "DigiKey";

const DIGIKEY_PRODUCT_URL_PREFIX: &str = "https://www.digikey.com/product-detail/en/-/";

/// Public product page for a DigiKey part number.
pub fn digikey_product_url(part_number: &str) -> String {
    format!("{}{}", DIGIKEY_PRODUCT_URL_PREFIX, part_number)
}

/// Maps a DigiKey product onto the generic schema.
///
/// Price breaks are ordered by quantity. The unit price is the lowest-quantity
/// break's price, else DigiKey's flat `UnitPrice`, else `None`. The product
/// URL is built from the part number rather than read from the payload.
pub fn normalize_digikey(record: &ProductRecord) -> GenericComponent {
    let product = &record.product;

    let mut price_breaks: Vec<PriceBreak> = product
        .standard_pricing
        .as_ref()
        .map(|pricing| {
            pricing
                .price_breaks
                .iter()
                .map(|pb| PriceBreak {
                    quantity: pb.break_quantity.max(0) as u64,
                    unit_price: pb.unit_price,
                    total_price: pb.total_price,
                })
                .collect()
        })
        .unwrap_or_default();
    price_breaks.sort_by_key(|pb| pb.quantity);

    let unit_price = price_breaks
        .first()
        .map(|pb| pb.unit_price)
        .or(product.unit_price);

    let parameters = product
        .parameters
        .iter()
        .map(|p| ComponentParameter {
            name: p.parameter.clone(),
            value: p.value.clone(),
            unit: None,
        })
        .collect();

    GenericComponent {
        distributor: DIGIKEY_NAME.to_string(),
        distributor_part_number: product.digi_key_part_number.clone(),
        manufacturer: product.manufacturer.clone().unwrap_or_default(),
        manufacturer_part_number: product.manufacturer_part_number.clone(),
        description: product.description.clone().unwrap_or_default(),
        detailed_description: product.detailed_description.clone(),
        quantity_available: product.quantity_available.max(0) as u64,
        minimum_order_quantity: product.minimum_order_quantity.max(1) as u64,
        unit_price,
        price_breaks,
        datasheet_url: product.primary_datasheet.clone(),
        product_url: Some(digikey_product_url(&product.digi_key_part_number)),
        image_url: product.primary_photo.clone(),
        parameters,
        packaging: product.packaging.clone(),
        series: product.series.clone(),
        product_status: product.product_status.clone(),
        rohs_status: product.rohs_status.clone(),
        lifecycle_status: None,
        raw_data: record.raw.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ProductRecord {
        serde_json::from_value(json).unwrap()
    }

    fn full_product() -> serde_json::Value {
        serde_json::json!({
            "DigiKeyPartNumber": "497-6063-ND",
            "ManufacturerPartNumber": "STM32F103C8T6",
            "Manufacturer": "STMicroelectronics",
            "Description": "IC MCU 32BIT 64KB FLASH 48LQFP",
            "QuantityAvailable": 10342,
            "MinimumOrderQuantity": 1,
            "UnitPrice": 9.99,
            "StandardPricing": {
                "PriceBreaks": [
                    { "BreakQuantity": 10, "UnitPrice": 6.41, "TotalPrice": 64.1 },
                    { "BreakQuantity": 1, "UnitPrice": 7.12, "TotalPrice": 7.12 }
                ]
            },
            "Parameters": [
                { "Parameter": "Speed", "Value": "72MHz" },
                { "Parameter": "Speed", "Value": "72MHz (max)" }
            ],
            "PrimaryDatasheet": "https://example.com/ds.pdf",
            "PrimaryPhoto": "https://example.com/photo.jpg",
            "RohsStatus": "ROHS3 Compliant",
            "Unmodelled": { "nested": [1, 2, 3] }
        })
    }

    #[test]
    fn maps_identity_and_media() {
        let c = normalize_digikey(&record(full_product()));
        assert_eq!(c.distributor, "DigiKey");
        assert_eq!(c.distributor_part_number, "497-6063-ND");
        assert_eq!(c.manufacturer, "STMicroelectronics");
        assert_eq!(c.manufacturer_part_number, "STM32F103C8T6");
        assert_eq!(c.datasheet_url.as_deref(), Some("https://example.com/ds.pdf"));
        assert_eq!(c.image_url.as_deref(), Some("https://example.com/photo.jpg"));
        assert_eq!(c.rohs_status.as_deref(), Some("ROHS3 Compliant"));
    }

    #[test]
    fn price_breaks_sorted_and_first_break_wins() {
        let c = normalize_digikey(&record(full_product()));
        let quantities: Vec<u64> = c.price_breaks.iter().map(|pb| pb.quantity).collect();
        assert_eq!(quantities, vec![1, 10]);
        assert_eq!(c.unit_price, Some(7.12));
        for pb in &c.price_breaks {
            assert!((pb.total_price - pb.quantity as f64 * pb.unit_price).abs() < 0.01);
        }
    }

    #[test]
    fn flat_price_used_without_breaks() {
        let c = normalize_digikey(&record(serde_json::json!({
            "DigiKeyPartNumber": "1-ND",
            "ManufacturerPartNumber": "X",
            "UnitPrice": 0.5
        })));
        assert!(c.price_breaks.is_empty());
        assert_eq!(c.unit_price, Some(0.5));
    }

    #[test]
    fn missing_fields_become_empty_or_null() {
        let c = normalize_digikey(&record(serde_json::json!({
            "DigiKeyPartNumber": "1-ND",
            "ManufacturerPartNumber": "X"
        })));
        assert_eq!(c.manufacturer, "");
        assert_eq!(c.description, "");
        assert_eq!(c.unit_price, None);
        assert_eq!(c.minimum_order_quantity, 1);
        assert_eq!(c.quantity_available, 0);
        assert!(c.detailed_description.is_none());
        assert!(c.lifecycle_status.is_none());
    }

    #[test]
    fn product_url_synthesized_from_part_number() {
        let mut json = full_product();
        json["ProductUrl"] = serde_json::json!("https://ignored.example.com");
        let c = normalize_digikey(&record(json));
        assert_eq!(
            c.product_url.as_deref(),
            Some("https://www.digikey.com/product-detail/en/-/497-6063-ND")
        );
    }

    #[test]
    fn duplicate_parameter_names_kept_in_order() {
        let c = normalize_digikey(&record(full_product()));
        assert_eq!(c.parameters.len(), 2);
        assert_eq!(c.parameters[0].name, "Speed");
        assert_eq!(c.parameters[1].value, "72MHz (max)");
        assert!(c.parameters.iter().all(|p| p.unit.is_none()));
    }

    #[test]
    fn raw_data_is_vendor_payload() {
        let payload = full_product();
        let c = normalize_digikey(&record(payload.clone()));
        assert_eq!(c.raw_data, payload);
    }

    #[test]
    fn negative_quantities_clamped() {
        let c = normalize_digikey(&record(serde_json::json!({
            "DigiKeyPartNumber": "1-ND",
            "ManufacturerPartNumber": "X",
            "QuantityAvailable": -5,
            "MinimumOrderQuantity": 0
        })));
        assert_eq!(c.quantity_available, 0);
        assert_eq!(c.minimum_order_quantity, 1);
    }
}
