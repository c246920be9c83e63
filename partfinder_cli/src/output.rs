use anyhow::Result;
use partfinder_lib::digikey_api::types::{Category, Manufacturer};
use partfinder_lib::GenericComponent;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const DESCRIPTION_WIDTH: usize = 48;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ComponentRow {
    #[tabled(rename = "Distributor")]
    #[serde(rename = "Distributor")]
    distributor: String,
    #[tabled(rename = "Part #")]
    #[serde(rename = "Part #")]
    distributor_part_number: String,
    #[tabled(rename = "Manufacturer")]
    #[serde(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "MPN")]
    #[serde(rename = "MPN")]
    manufacturer_part_number: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: u64,
    #[tabled(rename = "MOQ")]
    #[serde(rename = "MOQ")]
    moq: u64,
    #[tabled(rename = "Unit Price")]
    #[serde(rename = "Unit Price")]
    unit_price: String,
}

#[derive(Tabled, Serialize)]
struct ManufacturerRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Parent")]
    #[serde(rename = "Parent")]
    parent: String,
}

// -- Row builders --

fn build_component_rows(components: &[GenericComponent]) -> Vec<ComponentRow> {
    components
        .iter()
        .map(|c| ComponentRow {
            distributor: c.distributor.clone(),
            distributor_part_number: c.distributor_part_number.clone(),
            manufacturer: c.manufacturer.clone(),
            manufacturer_part_number: c.manufacturer_part_number.clone(),
            description: truncate(&c.description, DESCRIPTION_WIDTH),
            stock: c.quantity_available,
            moq: c.minimum_order_quantity,
            unit_price: format_price(c.unit_price),
        })
        .collect()
}

fn build_manufacturer_rows(manufacturers: &[Manufacturer]) -> Vec<ManufacturerRow> {
    manufacturers
        .iter()
        .map(|m| ManufacturerRow {
            id: m.id,
            name: m.name.clone(),
        })
        .collect()
}

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            name: c.name.clone(),
            parent: c.parent_id.map(|p| p.to_string()).unwrap_or_default(),
        })
        .collect()
}

// -- Generic printers --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

/// Prints components as a table, Markdown table or CSV. JSON output is the
/// full normalized component, so callers print it with [`print_json`].
pub fn print_components(components: &[GenericComponent], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&components);
            Ok(())
        }
        _ => print_rows(build_component_rows(components), format),
    }
}

pub fn print_manufacturers(manufacturers: &[Manufacturer], format: &OutputFormat) -> Result<()> {
    print_rows(build_manufacturer_rows(manufacturers), format)
}

pub fn print_categories(categories: &[Category], format: &OutputFormat) -> Result<()> {
    print_rows(build_category_rows(categories), format)
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// One-line price quote for ordering `quantity` pieces at the applicable break.
pub fn format_quote(component: &GenericComponent, quantity: u64) -> String {
    match component.unit_price_at(quantity) {
        Some(unit) => format!(
            "{} x {} @ {} = {}",
            quantity,
            component.distributor_part_number,
            format_price(Some(unit)),
            format_price(Some(unit * quantity as f64))
        ),
        None => format!(
            "No price available for {} x {}",
            quantity, component.distributor_part_number
        ),
    }
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p < 1.0 => format!("${:.4}", p),
        Some(p) => format!("${:.2}", p),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
