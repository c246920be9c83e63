use anyhow::Result;
use clap::Args;
use partfinder_lib::validation::{parse_distributor_list, validate_search_request};
use partfinder_lib::{Aggregator, SearchRequest};

use super::LocaleArgs;
use crate::output::{print_components, print_json, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Keywords to search for (e.g. "STM32F103" or "resistor 10k")
    pub keywords: String,

    /// Comma-separated distributors (digikey, mouser, farnell) or "all"
    #[arg(long)]
    pub distributors: Option<String>,

    /// Maximum results per distributor (1-100)
    #[arg(long, default_value = "50")]
    pub max_results: u32,

    /// Offset into each distributor's result list
    #[arg(long, default_value = "0")]
    pub offset: u32,

    #[command(flatten)]
    pub locale: LocaleArgs,
}

pub async fn run(args: &SearchArgs, aggregator: &Aggregator, format: &OutputFormat) -> Result<()> {
    let distributors = match &args.distributors {
        Some(list) => parse_distributor_list(list)?,
        None => None,
    };
    let request = SearchRequest::new(&args.keywords)
        .with_distributors(distributors)
        .with_max_results(args.max_results)
        .with_offset(args.offset)
        .with_locale(&args.locale.locale());
    let request = validate_search_request(request)?;

    let resp = aggregator.search_components(&request).await;

    match format {
        OutputFormat::Json => print_json(&resp),
        _ => {
            print_components(&resp.components, format)?;
            let searched: Vec<String> = resp
                .distributors_searched
                .iter()
                .map(|d| d.to_string())
                .collect();
            eprintln!(
                "\n{} components from [{}] in {:.0} ms",
                resp.total_count,
                searched.join(", "),
                resp.search_time_ms
            );
        }
    }
    Ok(())
}
