//! # Blockview
//!
//! Two tiny first-person viewers: a textured grass block and a textured,
//! rotated tag, each floating in front of a free-fly camera.
//!
//! ```no_run
//! use blockview::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     let config = ViewerConfig::new().title("Grass").size(800, 480);
//!     run(config, Model::grass_cube()?)
//! }
//! ```
//!
//! The scene is built once into a static [`Batch`] and uploaded to the GPU;
//! each frame only the [`Player`] moves. Mouse motion turns the camera, the
//! movement keys set a strafe intent that [`Player::update`] turns into
//! motion.

mod app;
mod batch;
mod block;
mod camera;
mod config;
mod controls;
mod error;
mod gpu;
mod mesh;
mod model;
mod player;
mod render;
mod texture;

pub use app::run;
pub use batch::{Batch, BatchGroup, GpuBatch, TextureId};
pub use block::{BlockType, FACES, Face, FaceTextures, GRASS, TAG};
pub use camera::{Camera, Projection};
pub use config::{DEFAULT_ASSET_ROOT, Layout, ViewerArgs, ViewerConfig};
pub use controls::{Command, Controls, KeyBindings, Movement};
pub use error::{Result, ViewerError};
pub use gpu::GpuContext;
pub use mesh::{
    FaceQuads, Mesh, QUAD_INDICES, QUAD_UVS, Quad, Vertex3d, block_faces, cuboid_faces,
    rotated_cuboid_faces,
};
pub use model::{Model, TagSpec};
pub use player::{MOUSE_SENSITIVITY, MOVE_SPEED, PITCH_LIMIT, Player, Rotation, Strafe};
pub use render::{CameraUniforms, FrameStatus, ScenePass};
pub use texture::{Procedural, Texture, TextureLoader, load_rgba};

// Re-export glam math types for convenience
pub use glam::{Quat, Vec3};

// Re-export winit key codes used by custom bindings
pub use winit::keyboard::KeyCode;
