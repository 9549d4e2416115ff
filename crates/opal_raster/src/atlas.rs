//! Atlas sampling interface
//!
//! Packing glyphs and images into atlas textures is the job of the layer
//! above; this module only defines how the sprite evaluators look a sample up.
//! A tile is an opaque reference into some texture, and the only thing the
//! evaluators ever do with it is turn a unit coordinate inside the sprite
//! into a normalized coordinate inside the texture and ask for a filtered
//! sample there.
//!
//! [`AtlasImage`] is the in-memory software implementation, used by tests and
//! by the software rasterizer.

use opal_core::{Point, Rgba, Size};
use rustc_hash::FxHashMap;

/// Identifies one atlas texture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtlasTextureId(pub u32);

/// Integer-pixel placement of a tile inside its texture
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AtlasTileBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Opaque reference to a packed sprite/glyph image.
///
/// Ownership of the backing pixels lives entirely with the atlas; primitives
/// only carry this reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AtlasTile {
    pub texture_id: AtlasTextureId,
    pub tile_id: u32,
    pub bounds: AtlasTileBounds,
}

impl AtlasTile {
    pub fn new(texture_id: AtlasTextureId, tile_id: u32, bounds: AtlasTileBounds) -> Self {
        Self {
            texture_id,
            tile_id,
            bounds,
        }
    }

    /// Normalized sample coordinate for a unit position inside the tile
    pub fn uv(&self, unit: Point, texture_size: Size) -> Point {
        Point::new(
            (self.bounds.x as f32 + unit.x * self.bounds.width as f32) / texture_size.width,
            (self.bounds.y as f32 + unit.y * self.bounds.height as f32) / texture_size.height,
        )
    }
}

/// A single atlas texture the evaluators can sample from
pub trait AtlasTexture {
    /// Pixel dimensions of the texture
    fn size(&self) -> Size;

    /// Filtered color at a normalized [0,1]² coordinate
    fn sample(&self, uv: Point) -> Rgba;
}

/// Resolves texture ids to textures for one frame
pub trait AtlasProvider {
    fn texture(&self, id: AtlasTextureId) -> Option<&dyn AtlasTexture>;
}

/// Provider for scenes that contain no sprites
impl AtlasProvider for () {
    fn texture(&self, _id: AtlasTextureId) -> Option<&dyn AtlasTexture> {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Software atlas image
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory RGBA8 atlas texture with bilinear filtering
pub struct AtlasImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AtlasImage {
    /// Wrap tightly packed RGBA8 pixel data
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build from a single-channel coverage bitmap, replicating the value
    /// across all four channels so the red channel carries the coverage
    pub fn from_coverage(width: u32, height: u32, coverage: &[u8]) -> Self {
        debug_assert_eq!(coverage.len(), (width * height) as usize);
        let mut pixels = Vec::with_capacity(coverage.len() * 4);
        for &c in coverage {
            pixels.extend_from_slice(&[c, c, c, c]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn texel(&self, x: u32, y: u32) -> Rgba {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let i = ((y * self.width + x) * 4) as usize;
        Rgba::new(
            self.pixels[i] as f32 / 255.0,
            self.pixels[i + 1] as f32 / 255.0,
            self.pixels[i + 2] as f32 / 255.0,
            self.pixels[i + 3] as f32 / 255.0,
        )
    }
}

impl AtlasTexture for AtlasImage {
    fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    fn sample(&self, uv: Point) -> Rgba {
        if self.width == 0 || self.height == 0 {
            return Rgba::TRANSPARENT;
        }

        // Bilinear filtering with clamp-to-edge addressing
        let x = (uv.x.clamp(0.0, 1.0) * self.width as f32 - 0.5).max(0.0);
        let y = (uv.y.clamp(0.0, 1.0) * self.height as f32 - 0.5).max(0.0);
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let top = c00.mix(c10, fx);
        let bottom = c01.mix(c11, fx);
        top.mix(bottom, fy)
    }
}

/// Texture registry backing [`AtlasProvider`] for the software rasterizer
#[derive(Default)]
pub struct AtlasImageStore {
    textures: FxHashMap<AtlasTextureId, AtlasImage>,
}

impl AtlasImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AtlasTextureId, image: AtlasImage) {
        self.textures.insert(id, image);
    }
}

impl AtlasProvider for AtlasImageStore {
    fn texture(&self, id: AtlasTextureId) -> Option<&dyn AtlasTexture> {
        self.textures.get(&id).map(|t| t as &dyn AtlasTexture)
    }
}
