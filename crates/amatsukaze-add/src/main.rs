//! `amatsukaze-add`: queue one file for encoding on an Amatsukaze server.
//!
//! ## Flow
//! 1. **Wake** (optional): broadcast a magic packet from `--wol-iface` and
//!    give the server `--wol-delay` seconds to boot.
//! 2. **Submit**: connect to `--connect` and send one add-queue request.
//! 3. **Wait**: log each response until the server reports it is finished.
//!
//! Any failure is fatal and exits with status 1.

use amatsukaze_add::{cli, runtime};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,amatsukaze_add=info")
        }))
        .init();

    let config = args.into_config();
    match runtime::run(&config).context("add encode job") {
        Ok(responses) => {
            tracing::info!(responses, "server finished handling request");
            Ok(())
        }
        Err(e) => {
            tracing::error!("{e:#}");
            std::process::exit(1);
        }
    }
}
