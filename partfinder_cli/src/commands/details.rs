use anyhow::{bail, Result};
use clap::Args;
use partfinder_lib::validation::validate_part_number;
use partfinder_lib::{Aggregator, DistributorId};

use super::LocaleArgs;
use crate::output::{format_quote, print_components, print_json, OutputFormat};

#[derive(Args)]
pub struct DetailsArgs {
    /// Distributor to query (digikey, mouser, farnell)
    pub distributor: String,

    /// The distributor's own part number (e.g. 296-6501-1-ND)
    pub part_number: String,

    /// Quote the unit and extended price for this order quantity
    #[arg(long)]
    pub quantity: Option<u64>,

    #[command(flatten)]
    pub locale: LocaleArgs,
}

pub async fn run(args: &DetailsArgs, aggregator: &Aggregator, format: &OutputFormat) -> Result<()> {
    let distributor: DistributorId = args.distributor.parse()?;
    let part_number = validate_part_number(&args.part_number)?;

    let Some(component) = aggregator
        .try_get_component_details(distributor, &part_number, &args.locale.locale())
        .await?
    else {
        bail!("Component {} not found in {}", part_number, distributor);
    };

    match format {
        OutputFormat::Json => match args.quantity {
            Some(quantity) => {
                let unit_price = component.unit_price_at(quantity);
                print_json(&serde_json::json!({
                    "quantity": quantity,
                    "unit_price": unit_price,
                    "extended_price": unit_price.map(|p| p * quantity as f64),
                    "component": component,
                }));
            }
            None => print_json(&component),
        },
        _ => {
            print_components(std::slice::from_ref(&component), format)?;
            if !component.price_breaks.is_empty() {
                println!("\nPrice breaks:");
                for pb in &component.price_breaks {
                    println!("  {:>8} @ {:.4} = {:.2}", pb.quantity, pb.unit_price, pb.total_price);
                }
            }
            for param in &component.parameters {
                println!("  {}: {}", param.name, param.value);
            }
            if let Some(quantity) = args.quantity {
                println!("\n{}", format_quote(&component, quantity));
            }
        }
    }
    Ok(())
}
