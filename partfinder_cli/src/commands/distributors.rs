use anyhow::Result;
use partfinder_lib::Aggregator;

use crate::output::{print_json, OutputFormat};

pub fn run(aggregator: &Aggregator, format: &OutputFormat) -> Result<()> {
    let distributors = aggregator.available_distributors();
    match format {
        OutputFormat::Json => print_json(&distributors),
        _ if distributors.is_empty() => {
            eprintln!("No distributors configured. Set DIGIKEY_CLIENT_ID and DIGIKEY_CLIENT_SECRET.");
        }
        _ => {
            for id in distributors {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
