use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::camera::Projection;
use crate::controls::KeyBindings;

/// Directory the block images are read from by default.
pub const DEFAULT_ASSET_ROOT: &str = "assets/textures/blocks";

/// Configuration for a viewer window.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Clear colour behind the scene, RGBA.
    pub sky_color: [f64; 4],
    pub asset_root: PathBuf,
    pub bindings: KeyBindings,
    pub projection: Projection,
    /// Generate textures instead of reading image files.
    pub procedural: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Blockview".to_string(),
            width: 800,
            height: 480,
            resizable: true,
            sky_color: [0.5, 0.7, 1.0, 1.0],
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            bindings: KeyBindings::default(),
            projection: Projection::default(),
            procedural: false,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn sky_color(mut self, r: f64, g: f64, b: f64, a: f64) -> Self {
        self.sky_color = [r, g, b, a];
        self
    }

    pub fn asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn procedural(mut self, procedural: bool) -> Self {
        self.procedural = procedural;
        self
    }

    pub(crate) fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.sky_color;
        wgpu::Color { r, g, b, a }
    }
}

/// Movement key layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// L forward, N back, R left, S right
    #[default]
    Lnrs,
    /// W/A/S/D
    Wasd,
}

impl Layout {
    pub fn bindings(self) -> KeyBindings {
        match self {
            Layout::Wasd => KeyBindings::wasd(),
            Layout::Lnrs => KeyBindings::lnrs(),
        }
    }
}

/// Command-line options shared by both viewers.
#[derive(Parser, Debug, Clone)]
pub struct ViewerArgs {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Directory holding the block textures
    #[arg(long, default_value = DEFAULT_ASSET_ROOT)]
    pub assets: PathBuf,

    /// Movement key layout
    #[arg(long, value_enum, default_value_t = Layout::Lnrs)]
    pub bindings: Layout,

    /// Generate textures instead of reading image files
    #[arg(long)]
    pub procedural: bool,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 65.0)]
    pub fov: f32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ViewerArgs {
    pub fn into_config(self, title: impl Into<String>) -> ViewerConfig {
        ViewerConfig::new()
            .title(title)
            .size(self.width, self.height)
            .asset_root(self.assets)
            .bindings(self.bindings.bindings())
            .procedural(self.procedural)
            .projection(Projection {
                fov_y: self.fov,
                ..Projection::default()
            })
    }

    /// Log filter directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Movement;
    use winit::keyboard::KeyCode;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        viewer: ViewerArgs,
    }

    #[test]
    fn defaults_match_the_reference_window() {
        let config = ViewerConfig::default();
        assert_eq!((config.width, config.height), (800, 480));
        assert!(config.resizable);
        assert_eq!(config.sky_color, [0.5, 0.7, 1.0, 1.0]);
        assert_eq!(config.asset_root, PathBuf::from("assets/textures/blocks"));
        assert_eq!(config.projection.fov_y, 65.0);
        assert!(!config.procedural);
    }

    #[test]
    fn clear_color_carries_the_sky() {
        let color = ViewerConfig::new().sky_color(0.1, 0.2, 0.3, 1.0).clear_color();
        assert_eq!((color.r, color.g, color.b, color.a), (0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn args_default_to_config_defaults() {
        let cli = TestCli::try_parse_from(["grass"]).unwrap();
        let config = cli.viewer.into_config("Grass");
        assert_eq!(config.title, "Grass");
        assert_eq!((config.width, config.height), (800, 480));
        assert_eq!(config.bindings, KeyBindings::lnrs());
        assert_eq!(config.bindings, ViewerConfig::default().bindings);
        assert_eq!(config.projection, Projection::default());
    }

    #[test]
    fn args_override_config() {
        let cli = TestCli::try_parse_from([
            "tag",
            "--width",
            "1280",
            "--height",
            "720",
            "--assets",
            "/tmp/blocks",
            "--bindings",
            "wasd",
            "--procedural",
            "--fov",
            "80",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.viewer.log_filter(), "debug");

        let config = cli.viewer.into_config("Tag");
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.asset_root, PathBuf::from("/tmp/blocks"));
        assert_eq!(
            config.bindings.movement_for(KeyCode::KeyW),
            Some(Movement::Forward)
        );
        assert!(config.procedural);
        assert_eq!(config.projection.fov_y, 80.0);
        assert_eq!(config.projection.far, 60.0);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(TestCli::try_parse_from(["grass", "--bindings", "dvorak"]).is_err());
    }
}
