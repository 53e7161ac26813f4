//! Static draw batches.
//!
//! A [`Batch`] collects textured quads on the CPU, grouped by texture. Once
//! the scene is complete it is uploaded into a [`GpuBatch`]: one mesh and one
//! texture bind group per group. The GPU batch is replayed every frame and
//! never rebuilt.
//!
//! ```ignore
//! let mut batch = Batch::new();
//! batch.add_quad(grass, faces[0], QUAD_UVS);
//! let gpu_batch = batch.upload(&gpu, &pass, &textures);
//!
//! // every frame
//! gpu_batch.draw(&mut render_pass);
//! ```

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, QUAD_INDICES, Quad, Vertex3d};
use crate::render::ScenePass;
use crate::texture::Texture;

/// Type-safe handle to a texture slot.
///
/// Slots are handed out by [`Model`](crate::Model) and index the texture
/// list passed to [`Batch::upload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) usize);

/// Quads sharing one texture.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchGroup {
    pub texture: TextureId,
    pub vertices: Vec<Vertex3d>,
    pub indices: Vec<u32>,
}

/// CPU-side collection of static textured quads.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    groups: Vec<BatchGroup>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one quad drawn with `texture`.
    ///
    /// Groups keep the order in which their texture was first seen.
    pub fn add_quad(&mut self, texture: TextureId, quad: Quad, uvs: [[f32; 2]; 4]) {
        let index = match self.groups.iter().position(|g| g.texture == texture) {
            Some(i) => i,
            None => {
                self.groups.push(BatchGroup {
                    texture,
                    vertices: Vec::new(),
                    indices: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[index];

        let base = group.vertices.len() as u32;
        group
            .vertices
            .extend(quad.iter().zip(uvs).map(|(p, uv)| Vertex3d::new(*p, uv)));
        group.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    pub fn groups(&self) -> &[BatchGroup] {
        &self.groups
    }

    /// Total number of quads in the batch.
    pub fn quad_count(&self) -> usize {
        self.groups.iter().map(|g| g.vertices.len() / 4).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Upload every group to the GPU.
    ///
    /// `textures` is indexed by [`TextureId`]; every id used in the batch
    /// must be in range.
    pub fn upload(&self, gpu: &GpuContext, pass: &ScenePass, textures: &[Texture]) -> GpuBatch {
        let groups = self
            .groups
            .iter()
            .map(|group| GpuGroup {
                mesh: Mesh::new(gpu, &group.vertices, &group.indices),
                bind_group: pass.create_texture_bind_group(gpu, &textures[group.texture.0]),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            groups = groups.len(),
            quads = self.quad_count(),
            "uploaded static batch"
        );

        GpuBatch { groups }
    }
}

struct GpuGroup {
    mesh: Mesh,
    bind_group: wgpu::BindGroup,
}

/// A batch living on the GPU, ready to be replayed.
pub struct GpuBatch {
    groups: Vec<GpuGroup>,
}

impl GpuBatch {
    /// Issue the draw calls for every group.
    ///
    /// The pass must already have the scene pipeline and camera bound.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        for group in &self.groups {
            render_pass.set_bind_group(1, &group.bind_group, &[]);
            render_pass.set_vertex_buffer(0, group.mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(group.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..group.mesh.index_count(), 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{QUAD_UVS, block_faces};
    use glam::Vec3;

    #[test]
    fn quads_with_the_same_texture_share_a_group() {
        let faces = block_faces(Vec3::ZERO);
        let mut batch = Batch::new();
        batch.add_quad(TextureId(0), faces[0], QUAD_UVS);
        batch.add_quad(TextureId(1), faces[1], QUAD_UVS);
        batch.add_quad(TextureId(0), faces[2], QUAD_UVS);

        assert_eq!(batch.groups().len(), 2);
        assert_eq!(batch.groups()[0].texture, TextureId(0));
        assert_eq!(batch.groups()[0].vertices.len(), 8);
        assert_eq!(batch.groups()[1].vertices.len(), 4);
        assert_eq!(batch.quad_count(), 3);
    }

    #[test]
    fn indices_are_offset_per_quad() {
        let faces = block_faces(Vec3::ZERO);
        let mut batch = Batch::new();
        batch.add_quad(TextureId(0), faces[0], QUAD_UVS);
        batch.add_quad(TextureId(0), faces[1], QUAD_UVS);

        assert_eq!(
            batch.groups()[0].indices,
            vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]
        );
    }

    #[test]
    fn vertices_carry_position_and_uv() {
        let quad = block_faces(Vec3::new(0.0, 0.0, -1.0))[2];
        let mut batch = Batch::new();
        batch.add_quad(TextureId(3), quad, QUAD_UVS);

        let vertices = &batch.groups()[0].vertices;
        for (i, vertex) in vertices.iter().enumerate() {
            assert_eq!(vertex.position, quad[i].to_array());
            assert_eq!(vertex.uv, QUAD_UVS[i]);
        }
    }

    #[test]
    fn empty_batch() {
        let batch = Batch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.quad_count(), 0);
    }
}
