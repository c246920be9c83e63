use anyhow::{bail, Result};
use clap::Args;
use partfinder_lib::validation::{parse_distributor_list, validate_part_number};
use partfinder_lib::{Aggregator, DistributorAvailability};

use super::LocaleArgs;
use crate::output::{print_components, print_json, OutputFormat};

#[derive(Args)]
pub struct CompareArgs {
    /// Manufacturer part number (e.g. STM32F103C8T6)
    pub manufacturer_part_number: String,

    /// Comma-separated distributors to compare, default all
    #[arg(long)]
    pub distributors: Option<String>,

    #[command(flatten)]
    pub locale: LocaleArgs,
}

pub async fn run(args: &CompareArgs, aggregator: &Aggregator, format: &OutputFormat) -> Result<()> {
    let mpn = validate_part_number(&args.manufacturer_part_number)?;
    let distributors = match &args.distributors {
        Some(list) => parse_distributor_list(list)?,
        None => None,
    };

    let matches = aggregator
        .compare_across_distributors(&mpn, distributors, &args.locale.locale())
        .await;
    if matches.is_empty() {
        bail!("Component {} not found in any distributor", mpn);
    }

    match format {
        OutputFormat::Json => print_json(&DistributorAvailability {
            manufacturer_part_number: mpn,
            distributors: matches,
        }),
        _ => print_components(&matches, format)?,
    }
    Ok(())
}
