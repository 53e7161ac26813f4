//! Block faces and the textures that cover them.
//!
//! Every cuboid in the viewers is described by six faces in a fixed order
//! ([`FACES`]). A [`BlockType`] names the image file drawn on each face; faces
//! without their own file fall back to the block's `side` texture.

use crate::error::{Result, ViewerError};

/// One face of a cuboid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// The `-X` face.
    Left,
    /// The `+X` face.
    Right,
    /// The `+Y` face.
    Top,
    /// The `-Y` face.
    Bottom,
    /// The `-Z` face.
    Front,
    /// The `+Z` face.
    Back,
}

/// Faces in the order the mesh builder emits them.
pub const FACES: [Face; 6] = [
    Face::Left,
    Face::Right,
    Face::Top,
    Face::Bottom,
    Face::Front,
    Face::Back,
];

impl Face {
    /// Position of this face in [`FACES`].
    pub fn index(self) -> usize {
        match self {
            Face::Left => 0,
            Face::Right => 1,
            Face::Top => 2,
            Face::Bottom => 3,
            Face::Front => 4,
            Face::Back => 5,
        }
    }
}

/// Image file names for each face of a block.
///
/// Any face left as `None` uses `side`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceTextures {
    pub side: Option<&'static str>,
    pub left: Option<&'static str>,
    pub right: Option<&'static str>,
    pub top: Option<&'static str>,
    pub bottom: Option<&'static str>,
    pub front: Option<&'static str>,
    pub back: Option<&'static str>,
}

impl FaceTextures {
    /// Textures with only a side fallback set.
    pub const fn sides(file: &'static str) -> Self {
        Self {
            side: Some(file),
            left: None,
            right: None,
            top: None,
            bottom: None,
            front: None,
            back: None,
        }
    }

    /// The file drawn on `face`: the face's own file, else the side file.
    pub fn file_for(&self, face: Face) -> Option<&'static str> {
        let own = match face {
            Face::Left => self.left,
            Face::Right => self.right,
            Face::Top => self.top,
            Face::Bottom => self.bottom,
            Face::Front => self.front,
            Face::Back => self.back,
        };
        own.or(self.side)
    }
}

/// A named block with its face textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub name: &'static str,
    pub textures: FaceTextures,
}

impl BlockType {
    /// Resolve the texture file for every face, in [`FACES`] order.
    pub fn face_files(&self) -> Result<[&'static str; 6]> {
        let mut files = [""; 6];
        for face in FACES {
            files[face.index()] =
                self.textures
                    .file_for(face)
                    .ok_or(ViewerError::MissingFaceTexture {
                        block: self.name,
                        face,
                    })?;
        }
        Ok(files)
    }
}

/// Grass: grassy sides, grass on top, dirt underneath.
pub const GRASS: BlockType = BlockType {
    name: "grass",
    textures: FaceTextures {
        top: Some("grass_top.png"),
        bottom: Some("dirt.png"),
        ..FaceTextures::sides("grass_side.png")
    },
};

/// A flat tag: printed on front and back, plain edges.
pub const TAG: BlockType = BlockType {
    name: "tag",
    textures: FaceTextures {
        front: Some("tag.png"),
        back: Some("tag.png"),
        ..FaceTextures::sides("tag_edge.png")
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_order_matches_index() {
        for (i, face) in FACES.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn grass_faces_fall_back_to_side() {
        let files = GRASS.face_files().unwrap();
        assert_eq!(
            files,
            [
                "grass_side.png",
                "grass_side.png",
                "grass_top.png",
                "dirt.png",
                "grass_side.png",
                "grass_side.png",
            ]
        );
    }

    #[test]
    fn tag_prints_front_and_back() {
        assert_eq!(TAG.textures.file_for(Face::Front), Some("tag.png"));
        assert_eq!(TAG.textures.file_for(Face::Back), Some("tag.png"));
        assert_eq!(TAG.textures.file_for(Face::Top), Some("tag_edge.png"));
    }

    #[test]
    fn missing_side_is_an_error() {
        let block = BlockType {
            name: "bare",
            textures: FaceTextures {
                top: Some("top.png"),
                ..FaceTextures::default()
            },
        };
        match block.face_files() {
            Err(ViewerError::MissingFaceTexture { block, face }) => {
                assert_eq!(block, "bare");
                assert_eq!(face, Face::Left);
            }
            other => panic!("expected MissingFaceTexture, got {other:?}"),
        }
    }
}
