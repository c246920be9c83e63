use anyhow::{anyhow, Result};
use clap::Args;
use partfinder_lib::{DigiKeyDistributor, Settings};

use super::LocaleArgs;
use crate::output::{print_categories, print_json, print_manufacturers, OutputFormat};

#[derive(Args)]
pub struct ManufacturersArgs {
    #[command(flatten)]
    pub locale: LocaleArgs,
}

#[derive(Args)]
pub struct CategoriesArgs {
    /// Fetch one category (with its children) by ID
    #[arg(long)]
    pub id: Option<i64>,

    #[command(flatten)]
    pub locale: LocaleArgs,
}

fn backend(settings: &Settings) -> Result<DigiKeyDistributor> {
    DigiKeyDistributor::from_settings(&settings.digikey)?.ok_or_else(|| {
        anyhow!("DigiKey is not configured. Set DIGIKEY_CLIENT_ID and DIGIKEY_CLIENT_SECRET.")
    })
}

pub async fn run_manufacturers(
    args: &ManufacturersArgs,
    settings: &Settings,
    format: &OutputFormat,
) -> Result<()> {
    let resp = backend(settings)?
        .manufacturers(&args.locale.locale())
        .await?;
    match format {
        OutputFormat::Json => print_json(&resp),
        _ => print_manufacturers(&resp.manufacturers, format)?,
    }
    Ok(())
}

pub async fn run_categories(
    args: &CategoriesArgs,
    settings: &Settings,
    format: &OutputFormat,
) -> Result<()> {
    let backend = backend(settings)?;
    let locale = args.locale.locale();

    if let Some(id) = args.id {
        // Single-category responses are passed through untyped.
        print_json(&backend.category(id, &locale).await?);
        return Ok(());
    }

    let resp = backend.categories(&locale).await?;
    match format {
        OutputFormat::Json => print_json(&resp),
        _ => print_categories(&resp.categories, format)?,
    }
    Ok(())
}
