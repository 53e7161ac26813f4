use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};
use crate::gpu::GpuContext;

/// A GPU texture with its sampler, ready to bind.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from raw RGBA data, rows top to bottom.
    pub fn from_rgba(gpu: &GpuContext, data: &[u8], width: u32, height: u32, label: &str) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest filtering keeps block pixels crisp up close
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Load a texture from an image file.
    pub fn from_file(gpu: &GpuContext, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = load_rgba(path)?;
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(gpu, &img, width, height, &path.display().to_string()))
    }

    /// Generate a procedural texture.
    pub fn procedural(gpu: &GpuContext, kind: Procedural, size: u32, seed: u32) -> Self {
        let data = kind.pixels(size, seed);
        Self::from_rgba(gpu, &data, size, size, kind.label())
    }
}

/// Decode an image file into RGBA8, rows top to bottom.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<image::RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| ViewerError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Built-in generated stand-ins for the block images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Procedural {
    GrassTop,
    GrassSide,
    Dirt,
    TagFace,
    TagEdge,
}

impl Procedural {
    /// The generator standing in for an image file, matched on its name.
    pub fn for_file(file: &str) -> Option<Self> {
        let stem = Path::new(file).file_stem()?.to_str()?;
        match stem {
            "grass_top" => Some(Self::GrassTop),
            "grass_side" => Some(Self::GrassSide),
            "dirt" => Some(Self::Dirt),
            "tag" => Some(Self::TagFace),
            "tag_edge" => Some(Self::TagEdge),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GrassTop => "Procedural Grass Top",
            Self::GrassSide => "Procedural Grass Side",
            Self::Dirt => "Procedural Dirt",
            Self::TagFace => "Procedural Tag Face",
            Self::TagEdge => "Procedural Tag Edge",
        }
    }

    /// RGBA pixels, `size * size * 4` bytes, rows top to bottom.
    pub fn pixels(self, size: u32, seed: u32) -> Vec<u8> {
        let mut data = vec![0u8; (size * size * 4) as usize];

        for y in 0..size {
            for x in 0..size {
                let idx = ((y * size + x) * 4) as usize;
                let (base, spread) = self.texel(x, y, size, seed);

                let variation =
                    (hash(x + 1000, y + 1000, seed) % spread) as i32 - (spread / 2) as i32;

                data[idx] = (base[0] as i32 + variation).clamp(0, 255) as u8;
                data[idx + 1] = (base[1] as i32 + variation).clamp(0, 255) as u8;
                data[idx + 2] = (base[2] as i32 + variation).clamp(0, 255) as u8;
                data[idx + 3] = 255;
            }
        }

        data
    }

    /// Base colour and variation spread for one texel.
    fn texel(self, x: u32, y: u32, size: u32, seed: u32) -> ([u8; 3], u32) {
        const DIRT: &[[u8; 3]] = &[
            [139, 90, 43],
            [160, 120, 60],
            [100, 70, 40],
            [120, 100, 70],
        ];
        const GRASS: &[[u8; 3]] = &[[86, 125, 70], [75, 115, 60], [95, 135, 75], [80, 120, 65]];
        const PAPER: &[[u8; 3]] = &[[236, 228, 206], [228, 220, 198], [240, 234, 214]];

        let h = hash(x, y, seed);
        let pick = |palette: &[[u8; 3]]| palette[(h % palette.len() as u32) as usize];

        match self {
            Self::GrassTop => (pick(GRASS), 20),
            Self::Dirt => (pick(DIRT), 30),
            Self::GrassSide => {
                // Ragged strip of grass hanging over the top rows
                let depth = size / 4 + hash(x, 0, seed.wrapping_add(7)) % (size / 8).max(1);
                if y < depth { (pick(GRASS), 20) } else { (pick(DIRT), 30) }
            }
            Self::TagFace => {
                let border = (size / 8).max(1);
                let on_border =
                    x < border || y < border || x >= size - border || y >= size - border;
                // Two printed lines across the middle
                let line = size / 2;
                let on_text = (y == line.saturating_sub(border) || y == line + border)
                    && x > border * 2
                    && x < size.saturating_sub(border * 2);
                if on_border {
                    ([178, 34, 34], 10)
                } else if on_text {
                    ([40, 40, 40], 10)
                } else {
                    (pick(PAPER), 8)
                }
            }
            Self::TagEdge => ([178, 34, 34], 10),
        }
    }
}

/// Simple hash for procedural generation.
fn hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_add(x.wrapping_mul(374761393));
    h = h.wrapping_add(y.wrapping_mul(668265263));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    h
}

/// Resolves face texture file names to GPU textures.
#[derive(Clone, Debug)]
pub struct TextureLoader {
    /// Directory the file names are relative to.
    pub root: PathBuf,
    /// Generate textures instead of reading files.
    pub procedural: bool,
}

/// Edge length of generated textures, in texels.
const PROCEDURAL_SIZE: u32 = 16;

impl TextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            procedural: false,
        }
    }

    pub fn procedural(mut self, procedural: bool) -> Self {
        self.procedural = procedural;
        self
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Load one texture.
    ///
    /// In procedural mode, files without a generator are still read from
    /// disk.
    pub fn load(&self, gpu: &GpuContext, file: &str) -> Result<Texture> {
        if self.procedural {
            if let Some(kind) = Procedural::for_file(file) {
                tracing::debug!(file, ?kind, "generating texture");
                return Ok(Texture::procedural(gpu, kind, PROCEDURAL_SIZE, 0));
            }
            tracing::warn!(file, "no generator for texture, reading it from disk");
        }

        let path = self.path_for(file);
        tracing::debug!(path = %path.display(), "loading texture");
        Texture::from_file(gpu, path)
    }

    /// Load every file, preserving order.
    pub fn load_all(&self, gpu: &GpuContext, files: &[&str]) -> Result<Vec<Texture>> {
        files.iter().map(|file| self.load(gpu, file)).collect()
    }
}
