//! Frame parameters and the software frame target
//!
//! [`FrameParams`] is the per-frame global state every evaluator call
//! receives explicitly; there is no ambient configuration. [`Frame`] is the
//! RGBA accumulation target the software rasterizer composites into, stored
//! premultiplied so ordered "over" blending is a fused multiply-add per
//! channel.

use crate::blend::over_premultiplied;
use opal_core::{linear_to_srgb, Rgba, Size};
use thiserror::Error;

/// Global parameters shared by all pipelines for one frame.
///
/// Layout matches the uniform block the native backend uploads.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameParams {
    /// Viewport size in logical pixels
    pub viewport_size: Size,
    /// Whether output colors are premultiplied (1) or straight (0)
    pub premultiplied_alpha: u32,
    pub pad: u32,
}

impl FrameParams {
    pub fn new(viewport_size: Size, premultiplied_alpha: bool) -> Self {
        Self {
            viewport_size,
            premultiplied_alpha: premultiplied_alpha as u32,
            pad: 0,
        }
    }

    pub fn premultiplied(&self) -> bool {
        self.premultiplied_alpha != 0
    }
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            viewport_size: Size::new(800.0, 600.0),
            premultiplied_alpha: 0,
            pad: 0,
        }
    }
}

/// Errors raised at the frame/submission surface. Evaluation itself never
/// fails; out-of-range inputs degrade to zero coverage instead.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("frame target has zero area ({width}x{height})")]
    EmptyTarget { width: u32, height: u32 },
    #[error("viewport {viewport:?} does not match frame target {width}x{height}")]
    ViewportMismatch {
        viewport: Size,
        width: u32,
        height: u32,
    },
}

/// Software frame target with premultiplied RGBA accumulation
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyTarget { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// Composite one contribution over the stored pixel, in submission order.
    ///
    /// `premultiplied` states how the source is encoded; the stored pixel is
    /// always premultiplied.
    pub fn composite(&mut self, x: u32, y: u32, source: Rgba, premultiplied: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let source = if premultiplied {
            source
        } else {
            Rgba::new(
                source.r * source.a,
                source.g * source.a,
                source.b * source.a,
                source.a,
            )
        };
        let index = (y * self.width + x) as usize;
        self.pixels[index] = over_premultiplied(self.pixels[index], source);
    }

    /// Premultiplied pixel value
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Straight-alpha pixel value
    pub fn pixel_straight(&self, x: u32, y: u32) -> Rgba {
        let p = self.pixel(x, y);
        if p.a <= f32::EPSILON {
            return Rgba::TRANSPARENT;
        }
        Rgba::new(p.r / p.a, p.g / p.a, p.b / p.a, p.a)
    }

    /// Encode the frame as sRGB RGBA8 bytes for inspection
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let straight = self.pixel_straight(x, y);
                let encoded = linear_to_srgb(straight);
                for channel in [encoded.r, encoded.g, encoded.b, straight.a] {
                    bytes.push((channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
                }
            }
        }
        bytes
    }
}
