use std::net::SocketAddr;

use anyhow::Result;
use clap::Args;
use partfinder_lib::Settings;

use crate::server;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides PARTFINDER_BIND)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

pub async fn run(args: &ServeArgs, settings: &Settings) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    server::serve(&settings).await
}
