//! Opal Core Types
//!
//! Foundational types for the Opal rasterization core:
//!
//! - **Geometry**: points, sizes, bounds, corner radii, border edges, and the
//!   affine sprite transform
//! - **Color**: HSLA style colors, linear RGBA working colors, and the
//!   sRGB/Oklab conversions used by gradient interpolation
//!
//! Everything here is a flat `#[repr(C)]` value type so primitive records can
//! be copied byte-for-byte into upload buffers by the renderer above.

pub mod color;
pub mod geometry;

pub use color::{
    linear_srgb_to_oklab, linear_to_srgb, oklab_to_linear_srgb, rgba_to_hsla, srgb_to_linear,
    Hsla, Oklab, Rgba,
};
pub use geometry::{Bounds, Corners, Edges, Point, Size, TransformationMatrix};
