//! Static quad geometry and GPU meshes.
//!
//! This module provides the building blocks the viewers draw with:
//!
//! - [`Vertex3d`]: the vertex format, position plus texture coordinates
//! - [`Mesh`]: GPU-resident vertex and index buffers
//! - [`cuboid_faces`], [`block_faces`] and [`rotated_cuboid_faces`]: the six
//!   textured quads of a box, in [`FACES`](crate::block::FACES) order
//!
//! # Vertex Layout
//!
//! [`Vertex3d`] is 20 bytes per vertex:
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | uv        | Float32x2 | 12     | 1               |
//!
//! # Winding
//!
//! Quads are split into the triangles `0, 1, 2` and `2, 3, 0`. Faces are not
//! culled, so the winding of the face table does not matter for visibility.

use crate::gpu::GpuContext;
use glam::{Quat, Vec3};

/// The four corners of a textured quad.
pub type Quad = [Vec3; 4];

/// Six quads, one per face, in [`FACES`](crate::block::FACES) order.
pub type FaceQuads = [Quad; 6];

/// Texture coordinates applied to every quad, matching the corner order of
/// the face table.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Triangle indices for one quad, relative to its first vertex.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// A vertex with position and texture coordinates.
///
/// `#[repr(C)]` plus [`bytemuck::Pod`] lets vertex slices be uploaded
/// directly with [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// World-space position. Static geometry is baked in world space.
    pub position: [f32; 3],
    /// Texture coordinates in `[0, 1]`, `v` pointing up the image.
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: impl Into<[f32; 3]>, uv: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            uv,
        }
    }
}

/// GPU-resident geometry with vertex and index buffers.
///
/// Meshes are immutable once uploaded; the viewers build theirs once at
/// startup and replay them every frame.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Upload vertex and index data to new GPU buffers.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Number of indices drawn by this mesh.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// The six faces of an axis-aligned box with minimum corner `min`.
///
/// Corner order per face (with `d = min + size`):
///
/// | Face   | Corners |
/// |--------|---------|
/// | left   | `(x,y,z) (x,y,dz) (x,dy,dz) (x,dy,z)` |
/// | right  | `(dx,y,dz) (dx,y,z) (dx,dy,z) (dx,dy,dz)` |
/// | top    | `(x,dy,dz) (dx,dy,dz) (dx,dy,z) (x,dy,z)` |
/// | bottom | `(x,y,z) (dx,y,z) (dx,y,dz) (x,y,dz)` |
/// | front  | `(dx,y,z) (x,y,z) (x,dy,z) (dx,dy,z)` |
/// | back   | `(x,y,dz) (dx,y,dz) (dx,dy,dz) (x,dy,dz)` |
///
/// Paired with [`QUAD_UVS`], the first two corners of every side face sit on
/// the bottom edge, so side textures stand upright.
pub fn cuboid_faces(min: Vec3, size: Vec3) -> FaceQuads {
    let (x, y, z) = (min.x, min.y, min.z);
    let max = min + size;
    let (dx, dy, dz) = (max.x, max.y, max.z);
    let v = Vec3::new;

    #[rustfmt::skip]
    let faces = [
        [v(x, y, z),   v(x, y, dz),   v(x, dy, dz),  v(x, dy, z)],   // left
        [v(dx, y, dz), v(dx, y, z),   v(dx, dy, z),  v(dx, dy, dz)], // right
        [v(x, dy, dz), v(dx, dy, dz), v(dx, dy, z),  v(x, dy, z)],   // top
        [v(x, y, z),   v(dx, y, z),   v(dx, y, dz),  v(x, y, dz)],   // bottom
        [v(dx, y, z),  v(x, y, z),    v(x, dy, z),   v(dx, dy, z)],  // front
        [v(x, y, dz),  v(dx, y, dz),  v(dx, dy, dz), v(x, dy, dz)],  // back
    ];
    faces
}

/// The unit block whose minimum corner is `position`.
pub fn block_faces(position: Vec3) -> FaceQuads {
    cuboid_faces(position, Vec3::ONE)
}

/// A box of `size` centred on `center`, rotated about its centre.
///
/// The rotation is baked into the vertices, so the result can go straight
/// into a static batch.
pub fn rotated_cuboid_faces(center: Vec3, size: Vec3, rotation: Quat) -> FaceQuads {
    let mut faces = cuboid_faces(-size * 0.5, size);
    for quad in &mut faces {
        for corner in quad.iter_mut() {
            *corner = center + rotation * *corner;
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Face;

    fn flat(quad: &Quad) -> Vec<f32> {
        quad.iter().flat_map(|c| c.to_array()).collect()
    }

    #[test]
    fn block_faces_follow_the_face_table() {
        let faces = block_faces(Vec3::new(0.0, 0.0, -1.0));
        let (x, y, z) = (0.0, 0.0, -1.0);
        let (dx, dy, dz) = (1.0, 1.0, 0.0);

        assert_eq!(
            flat(&faces[Face::Left.index()]),
            vec![x, y, z, x, y, dz, x, dy, dz, x, dy, z]
        );
        assert_eq!(
            flat(&faces[Face::Right.index()]),
            vec![dx, y, dz, dx, y, z, dx, dy, z, dx, dy, dz]
        );
        assert_eq!(
            flat(&faces[Face::Top.index()]),
            vec![x, dy, dz, dx, dy, dz, dx, dy, z, x, dy, z]
        );
        assert_eq!(
            flat(&faces[Face::Bottom.index()]),
            vec![x, y, z, dx, y, z, dx, y, dz, x, y, dz]
        );
        assert_eq!(
            flat(&faces[Face::Front.index()]),
            vec![dx, y, z, x, y, z, x, dy, z, dx, dy, z]
        );
        assert_eq!(
            flat(&faces[Face::Back.index()]),
            vec![x, y, dz, dx, y, dz, dx, dy, dz, x, dy, dz]
        );
    }

    #[test]
    fn each_face_lies_on_its_plane() {
        let faces = cuboid_faces(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 0.5, 0.25));
        assert!(faces[Face::Left.index()].iter().all(|c| c.x == 1.0));
        assert!(faces[Face::Right.index()].iter().all(|c| c.x == 3.0));
        assert!(faces[Face::Top.index()].iter().all(|c| c.y == 2.5));
        assert!(faces[Face::Bottom.index()].iter().all(|c| c.y == 2.0));
        assert!(faces[Face::Front.index()].iter().all(|c| c.z == 3.0));
        assert!(faces[Face::Back.index()].iter().all(|c| c.z == 3.25));
    }

    #[test]
    fn side_faces_start_on_the_bottom_edge() {
        let faces = block_faces(Vec3::ZERO);
        for face in [Face::Left, Face::Right, Face::Front, Face::Back] {
            let quad = faces[face.index()];
            assert_eq!(quad[0].y, 0.0);
            assert_eq!(quad[1].y, 0.0);
            assert_eq!(quad[2].y, 1.0);
            assert_eq!(quad[3].y, 1.0);
        }
    }

    #[test]
    fn identity_rotation_centres_the_box() {
        let center = Vec3::new(0.5, 0.5, -2.0);
        let size = Vec3::new(1.0, 0.5, 0.0625);
        let rotated = rotated_cuboid_faces(center, size, Quat::IDENTITY);
        let plain = cuboid_faces(center - size * 0.5, size);

        for (a, b) in rotated.iter().zip(plain.iter()) {
            for (p, q) in a.iter().zip(b.iter()) {
                assert!(p.abs_diff_eq(*q, 1e-6));
            }
        }
    }

    #[test]
    fn rotation_keeps_corners_at_the_same_distance() {
        let center = Vec3::new(0.0, 1.0, -3.0);
        let size = Vec3::new(1.0, 0.5, 0.1);
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.5, 0.2, 0.3);
        let half_diagonal = (size * 0.5).length();

        for quad in rotated_cuboid_faces(center, size, rotation) {
            for corner in quad {
                assert!(((corner - center).length() - half_diagonal).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn quarter_turn_about_y_swaps_width_and_depth() {
        let size = Vec3::new(2.0, 1.0, 0.5);
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let faces = rotated_cuboid_faces(Vec3::ZERO, size, rotation);

        let (mut min, mut max) = (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN));
        for corner in faces.iter().flatten() {
            min = min.min(*corner);
            max = max.max(*corner);
        }
        assert!((max - min).abs_diff_eq(Vec3::new(0.5, 1.0, 2.0), 1e-5));
    }
}
