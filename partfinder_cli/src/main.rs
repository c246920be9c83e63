mod commands;
mod output;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use partfinder_lib::{Aggregator, Settings};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "partfinder")]
#[command(about = "Search and compare electronic components across distributors")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    Serve(commands::serve::ServeArgs),
    /// List distributors with configured credentials
    Distributors,
    /// Keyword search across distributors
    Search(commands::search::SearchArgs),
    /// Look up one part on one distributor
    Details(commands::details::DetailsArgs),
    /// Compare one manufacturer part number across distributors
    Compare(commands::compare::CompareArgs),
    /// List DigiKey manufacturers
    Manufacturers(commands::digikey::ManufacturersArgs),
    /// List DigiKey product categories
    Categories(commands::digikey::CategoriesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("partfinder=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let settings = Settings::from_env()?;

    let aggregator = || Aggregator::from_settings(&settings);

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args, &settings).await?,
        Commands::Distributors => commands::distributors::run(&aggregator()?, &format)?,
        Commands::Search(args) => commands::search::run(args, &aggregator()?, &format).await?,
        Commands::Details(args) => commands::details::run(args, &aggregator()?, &format).await?,
        Commands::Compare(args) => commands::compare::run(args, &aggregator()?, &format).await?,
        Commands::Manufacturers(args) => {
            commands::digikey::run_manufacturers(args, &settings, &format).await?
        }
        Commands::Categories(args) => {
            commands::digikey::run_categories(args, &settings, &format).await?
        }
    }

    Ok(())
}
