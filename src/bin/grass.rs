//! Grass viewer: one textured grass block in front of a fly camera.
//!
//! Look around with the mouse, move with the bound keys (L/N/R/S by
//! default), Space and Left Shift to rise and sink, Escape to quit.

use anyhow::{Context, Result};
use blockview::{Model, ViewerArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grass", about = "Fly around a textured grass block")]
struct Cli {
    #[command(flatten)]
    viewer: ViewerArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.viewer.log_filter())),
        )
        .init();

    let model = Model::grass_cube().context("building the grass block")?;
    let config = cli.viewer.into_config("Grass");

    tracing::info!(assets = %config.asset_root.display(), "grass viewer starting");
    blockview::run(config, model).context("running the grass viewer")?;

    Ok(())
}
