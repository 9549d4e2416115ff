//! Primitive records and scene submission
//!
//! Every record is produced once per frame by the layer above, submitted as
//! part of a [`Scene`], read many times during rasterization, and discarded at
//! the end of the frame. Records are never mutated after submission and the
//! core never reorders them; the `order` field exists for the submitting layer
//! and painting happens in submission order.

use crate::atlas::AtlasTile;
use crate::shadow::BLUR_SUPPORT;
use opal_core::{Bounds, Corners, Edges, Hsla, Point, TransformationMatrix};

// ─────────────────────────────────────────────────────────────────────────────
// Backgrounds
// ─────────────────────────────────────────────────────────────────────────────

/// Color space a gradient interpolates in
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorSpace {
    #[default]
    Srgb = 0,
    Oklab = 1,
    Linear = 2,
}

/// One gradient stop: color plus its position along the gradient axis.
///
/// Stops are submitted in ascending percentage order; the evaluator does not
/// validate ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearColorStop {
    pub color: Hsla,
    pub percentage: f32,
}

impl LinearColorStop {
    pub fn new(color: Hsla, percentage: f32) -> Self {
        Self {
            color,
            percentage: percentage.clamp(0.0, 1.0),
        }
    }
}

/// Fill style for quads and paths.
///
/// Only the solid variant is active for quads; paths use both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
    Solid(Hsla),
    /// Two-stop linear gradient. The angle is degrees clockwise from vertical,
    /// matching CSS gradient-angle semantics.
    LinearGradient {
        angle: f32,
        stops: [LinearColorStop; 2],
        color_space: ColorSpace,
    },
}

impl Background {
    pub fn linear_gradient(
        angle: f32,
        from: LinearColorStop,
        to: LinearColorStop,
        color_space: ColorSpace,
    ) -> Self {
        Background::LinearGradient {
            angle,
            stops: [from, to],
            color_space,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Hsla::TRANSPARENT)
    }
}

impl From<Hsla> for Background {
    fn from(color: Hsla) -> Self {
        Background::Solid(color)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Primitive records
// ─────────────────────────────────────────────────────────────────────────────

/// Filled, optionally bordered, rounded rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quad {
    pub order: u32,
    pub bounds: Bounds,
    pub content_mask: Bounds,
    pub background: Background,
    pub border_color: Hsla,
    pub corner_radii: Corners,
    pub border_widths: Edges,
}

impl Quad {
    pub fn new(bounds: Bounds, background: impl Into<Background>) -> Self {
        Self {
            bounds,
            content_mask: bounds,
            background: background.into(),
            ..Default::default()
        }
    }

    pub fn with_corner_radii(mut self, radii: impl Into<Corners>) -> Self {
        self.corner_radii = radii.into();
        self
    }

    pub fn with_border(mut self, widths: impl Into<Edges>, color: Hsla) -> Self {
        self.border_widths = widths.into();
        self.border_color = color;
        self
    }

    pub fn with_content_mask(mut self, mask: Bounds) -> Self {
        self.content_mask = mask;
        self
    }
}

/// Blurred drop shadow of a rounded rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shadow {
    pub order: u32,
    pub blur_radius: f32,
    pub bounds: Bounds,
    pub corner_radii: Corners,
    pub content_mask: Bounds,
    pub color: Hsla,
}

impl Shadow {
    pub fn new(bounds: Bounds, blur_radius: f32, color: Hsla) -> Self {
        Self {
            blur_radius,
            bounds,
            content_mask: bounds.dilate(blur_radius * BLUR_SUPPORT),
            color,
            ..Default::default()
        }
    }

    pub fn with_corner_radii(mut self, radii: impl Into<Corners>) -> Self {
        self.corner_radii = radii.into();
        self
    }

    pub fn with_content_mask(mut self, mask: Bounds) -> Self {
        self.content_mask = mask;
        self
    }
}

/// Single-channel glyph sprite, tinted by a flat color
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MonochromeSprite {
    pub order: u32,
    pub bounds: Bounds,
    pub content_mask: Bounds,
    pub color: Hsla,
    pub tile: AtlasTile,
    pub transformation: TransformationMatrix,
}

impl MonochromeSprite {
    pub fn new(bounds: Bounds, color: Hsla, tile: AtlasTile) -> Self {
        Self {
            bounds,
            content_mask: bounds,
            color,
            tile,
            transformation: TransformationMatrix::IDENTITY,
            ..Default::default()
        }
    }
}

/// Full-color image sprite.
///
/// `corner_radii` is carried for upload layout compatibility but not consumed
/// by the evaluator yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolychromeSprite {
    pub order: u32,
    pub grayscale: bool,
    pub opacity: f32,
    pub bounds: Bounds,
    pub content_mask: Bounds,
    pub corner_radii: Corners,
    pub tile: AtlasTile,
    pub transformation: TransformationMatrix,
}

impl PolychromeSprite {
    pub fn new(bounds: Bounds, tile: AtlasTile) -> Self {
        Self {
            opacity: 1.0,
            bounds,
            content_mask: bounds,
            tile,
            transformation: TransformationMatrix::IDENTITY,
            ..Default::default()
        }
    }

    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// One vertex of a filled path.
///
/// `st_position` parameterizes the implicit quadratic curve: a point is on the
/// filled side where `s² - t < 0`. Interior triangles carry st values that
/// keep the whole triangle on the filled side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathVertex {
    pub xy_position: Point,
    pub st_position: Point,
}

impl PathVertex {
    pub fn new(xy_position: Point, st_position: Point) -> Self {
        Self {
            xy_position,
            st_position,
        }
    }
}

/// Filled vector region as a triangle list with implicit-curve edges
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub order: u32,
    pub bounds: Bounds,
    pub content_mask: Bounds,
    pub background: Background,
    pub vertices: Vec<PathVertex>,
}

impl Path {
    pub fn new(bounds: Bounds, background: impl Into<Background>, vertices: Vec<PathVertex>) -> Self {
        Self {
            bounds,
            content_mask: bounds,
            background: background.into(),
            vertices,
            ..Default::default()
        }
    }

    pub fn with_content_mask(mut self, mask: Bounds) -> Self {
        self.content_mask = mask;
        self
    }
}

/// Straight or wavy text underline
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Underline {
    pub order: u32,
    pub bounds: Bounds,
    pub content_mask: Bounds,
    pub color: Hsla,
    pub thickness: f32,
    pub wavy: bool,
}

impl Underline {
    pub fn new(bounds: Bounds, thickness: f32, color: Hsla) -> Self {
        Self {
            bounds,
            content_mask: bounds,
            color,
            thickness,
            ..Default::default()
        }
    }

    pub fn with_wavy(mut self, wavy: bool) -> Self {
        self.wavy = wavy;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scene
// ─────────────────────────────────────────────────────────────────────────────

/// One batch of same-typed primitives, painted in submission order
#[derive(Clone, Debug)]
pub enum PrimitiveBatch {
    Quads(Vec<Quad>),
    Shadows(Vec<Shadow>),
    MonochromeSprites(Vec<MonochromeSprite>),
    PolychromeSprites(Vec<PolychromeSprite>),
    Paths(Vec<Path>),
    Underlines(Vec<Underline>),
}

/// Per-frame collection of primitive batches.
///
/// Consecutive pushes of the same primitive type coalesce into one batch, the
/// shape the instanced draw calls of the native renderer want. The scene is
/// cleared and rebuilt every frame.
#[derive(Default)]
pub struct Scene {
    batches: Vec<PrimitiveBatch>,
}

macro_rules! push_primitive {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(&mut self, primitive: $ty) {
            if let Some(PrimitiveBatch::$variant(batch)) = self.batches.last_mut() {
                batch.push(primitive);
            } else {
                self.batches.push(PrimitiveBatch::$variant(vec![primitive]));
            }
        }
    };
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    push_primitive!(push_quad, Quads, Quad);
    push_primitive!(push_shadow, Shadows, Shadow);
    push_primitive!(push_monochrome_sprite, MonochromeSprites, MonochromeSprite);
    push_primitive!(push_polychrome_sprite, PolychromeSprites, PolychromeSprite);
    push_primitive!(push_path, Paths, Path);
    push_primitive!(push_underline, Underlines, Underline);

    pub fn batches(&self) -> impl Iterator<Item = &PrimitiveBatch> {
        self.batches.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }
}
