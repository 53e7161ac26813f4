//! The static scene each viewer draws.

use glam::{EulerRot, Quat, Vec3};

use crate::batch::{Batch, TextureId};
use crate::block::{BlockType, FACES, GRASS, TAG};
use crate::error::Result;
use crate::mesh::{FaceQuads, QUAD_UVS, block_faces, rotated_cuboid_faces};

/// Placement of the rotated tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TagSpec {
    /// Centre of the tag in world space.
    pub center: Vec3,
    /// Width, height and thickness.
    pub size: Vec3,
    /// Turn about +Y, in degrees.
    pub yaw: f32,
    /// Tilt about +X, in degrees.
    pub pitch: f32,
    /// Roll about +Z, in degrees.
    pub roll: f32,
}

impl Default for TagSpec {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.5, 0.5, -2.0),
            size: Vec3::new(1.0, 0.5, 0.0625),
            yaw: 30.0,
            pitch: 0.0,
            roll: 15.0,
        }
    }
}

impl TagSpec {
    /// Yaw, then pitch, then roll, as one quaternion.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    pub fn faces(&self) -> FaceQuads {
        rotated_cuboid_faces(self.center, self.size, self.rotation())
    }
}

/// A batch of static geometry plus the texture files it refers to.
///
/// Texture files are deduplicated: every distinct file name gets one
/// [`TextureId`], in the order first used.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub batch: Batch,
    textures: Vec<&'static str>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// A grass block sitting just in front of the starting camera.
    pub fn grass_cube() -> Result<Self> {
        let mut model = Self::new();
        model.draw_block(Vec3::new(0.0, 0.0, -1.0), &GRASS)?;
        Ok(model)
    }

    /// A single rotated tag.
    pub fn tag(spec: &TagSpec) -> Result<Self> {
        let mut model = Self::new();
        model.draw_tag(spec)?;
        Ok(model)
    }

    /// Add the unit block whose minimum corner is `position`.
    pub fn draw_block(&mut self, position: Vec3, block: &BlockType) -> Result<()> {
        self.draw_faces(block_faces(position), block)
    }

    /// Add a tag, its vertices rotated once here.
    pub fn draw_tag(&mut self, spec: &TagSpec) -> Result<()> {
        self.draw_faces(spec.faces(), &TAG)
    }

    fn draw_faces(&mut self, faces: FaceQuads, block: &BlockType) -> Result<()> {
        let files = block.face_files()?;
        for face in FACES {
            let texture = self.texture_slot(files[face.index()]);
            self.batch.add_quad(texture, faces[face.index()], QUAD_UVS);
        }
        Ok(())
    }

    fn texture_slot(&mut self, file: &'static str) -> TextureId {
        match self.textures.iter().position(|f| *f == file) {
            Some(i) => TextureId(i),
            None => {
                self.textures.push(file);
                TextureId(self.textures.len() - 1)
            }
        }
    }

    /// Texture file names, indexed by [`TextureId`].
    pub fn texture_files(&self) -> &[&'static str] {
        &self.textures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_cube_uses_three_textures() {
        let model = Model::grass_cube().unwrap();
        assert_eq!(
            model.texture_files(),
            &["grass_side.png", "grass_top.png", "dirt.png"]
        );
        assert_eq!(model.batch.quad_count(), 6);
        assert_eq!(model.batch.groups().len(), 3);
    }

    #[test]
    fn grass_cube_sits_at_minus_one_z() {
        let model = Model::grass_cube().unwrap();
        let positions = model
            .batch
            .groups()
            .iter()
            .flat_map(|g| g.vertices.iter().map(|v| Vec3::from(v.position)));
        for p in positions {
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
            assert!((-1.0..=0.0).contains(&p.z));
        }
    }

    #[test]
    fn tag_uses_face_and_edge_textures() {
        let model = Model::tag(&TagSpec::default()).unwrap();
        assert_eq!(model.texture_files(), &["tag_edge.png", "tag.png"]);

        let printed = &model.batch.groups()[1];
        assert_eq!(printed.texture, TextureId(1));
        assert_eq!(printed.vertices.len(), 8);
    }

    #[test]
    fn blocks_share_texture_slots() {
        let mut model = Model::new();
        model.draw_block(Vec3::ZERO, &GRASS).unwrap();
        model.draw_block(Vec3::X, &GRASS).unwrap();
        assert_eq!(model.texture_files().len(), 3);
        assert_eq!(model.batch.quad_count(), 12);
    }

    #[test]
    fn tag_rotation_follows_its_angles() {
        let spec = TagSpec {
            yaw: 90.0,
            pitch: 0.0,
            roll: 0.0,
            ..TagSpec::default()
        };
        let turned = spec.rotation() * Vec3::X;
        assert!(turned.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }
}
