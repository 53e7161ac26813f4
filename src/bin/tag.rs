//! Tag viewer: one textured, rotated tag in front of a fly camera.
//!
//! The tag's rotation is fixed at startup and baked into its vertices.

use anyhow::{Context, Result};
use blockview::{Model, TagSpec, ViewerArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tag", about = "Fly around a rotated, textured tag")]
struct Cli {
    #[command(flatten)]
    viewer: ViewerArgs,

    /// Tag turn about the vertical axis, in degrees
    #[arg(long, allow_negative_numbers = true)]
    yaw: Option<f32>,

    /// Tag tilt about the horizontal axis, in degrees
    #[arg(long, allow_negative_numbers = true)]
    pitch: Option<f32>,

    /// Tag roll about the depth axis, in degrees
    #[arg(long, allow_negative_numbers = true)]
    roll: Option<f32>,
}

impl Cli {
    fn tag_spec(&self) -> TagSpec {
        let default = TagSpec::default();
        TagSpec {
            yaw: self.yaw.unwrap_or(default.yaw),
            pitch: self.pitch.unwrap_or(default.pitch),
            roll: self.roll.unwrap_or(default.roll),
            ..default
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.viewer.log_filter())),
        )
        .init();

    let spec = cli.tag_spec();
    let model = Model::tag(&spec).context("building the tag")?;
    let config = cli.viewer.into_config("Tag");

    tracing::info!(
        yaw = spec.yaw,
        pitch = spec.pitch,
        roll = spec.roll,
        "tag viewer starting"
    );
    blockview::run(config, model).context("running the tag viewer")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_flags_override_the_default() {
        let cli = Cli::try_parse_from(["tag", "--yaw", "-45", "--roll", "0"]).unwrap();
        let spec = cli.tag_spec();
        assert_eq!(spec.yaw, -45.0);
        assert_eq!(spec.pitch, TagSpec::default().pitch);
        assert_eq!(spec.roll, 0.0);
        assert_eq!(spec.center, TagSpec::default().center);
    }
}
