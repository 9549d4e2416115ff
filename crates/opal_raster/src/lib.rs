//! Opal Rasterization Core
//!
//! Per-primitive analytic coverage and color evaluation for a retained-mode
//! UI renderer, plus a software frame target to composite into:
//!
//! - **Quads**: rounded, bordered rectangles via signed distance fields
//! - **Shadows**: closed-form Gaussian blur approximation of rounded rects
//! - **Sprites**: monochrome glyph coverage and polychrome image samples
//!   from an external atlas
//! - **Paths**: filled vector regions with implicit quadratic-curve edges,
//!   solid or two-stop gradient fills in sRGB, Oklab, or linear space
//! - **Underlines**: straight and wavy
//!
//! Evaluation of each (primitive, pixel) pair is pure and order-independent;
//! compositing into the frame happens strictly in submission order because
//! alpha blending does not commute. Primitive records are produced upstream
//! once per frame and are read-only here.
//!
//! # Example
//!
//! ```
//! use opal_core::{Bounds, Hsla, Size};
//! use opal_raster::{Frame, FrameParams, Quad, Rasterizer, Scene};
//!
//! let mut scene = Scene::new();
//! scene.push_quad(
//!     Quad::new(Bounds::new(10.0, 10.0, 80.0, 80.0), Hsla::BLUE)
//!         .with_corner_radii(8.0),
//! );
//!
//! let mut frame = Frame::new(100, 100).unwrap();
//! let params = FrameParams::new(Size::new(100.0, 100.0), false);
//! Rasterizer::new(&mut frame, params)
//!     .unwrap()
//!     .draw_scene(&scene, &());
//!
//! assert!(frame.pixel(50, 50).a > 0.99);
//! ```

pub mod atlas;
pub mod blend;
pub mod clip;
pub mod frame;
pub mod gradient;
pub mod path;
pub mod quad;
pub mod rasterizer;
pub mod scene;
pub mod sdf;
pub mod shadow;
pub mod sprite;
pub mod underline;

pub use atlas::{
    AtlasImage, AtlasImageStore, AtlasProvider, AtlasTexture, AtlasTextureId, AtlasTile,
    AtlasTileBounds,
};
pub use blend::{blend_color, over, over_premultiplied};
pub use clip::{distance_from_clip_rect, distances_at, is_clipped, to_device_position};
pub use frame::{Frame, FrameParams, RasterError};
pub use gradient::background_color;
pub use path::{PathBuilder, PathFill, PathTriangle};
pub use quad::{evaluate_quad, ANTIALIAS_THRESHOLD};
pub use rasterizer::{EvalContext, PrimitiveEvaluator, RasterConfig, Rasterizer};
pub use scene::{
    Background, ColorSpace, LinearColorStop, MonochromeSprite, Path, PathVertex, PolychromeSprite,
    PrimitiveBatch, Quad, Scene, Shadow, Underline,
};
pub use sdf::{pick_corner_radius, rounded_rect_sdf};
pub use shadow::{evaluate_shadow, BLUR_SUPPORT};
pub use sprite::{evaluate_monochrome_sprite, evaluate_polychrome_sprite};
pub use underline::{evaluate_underline, underline_geometry, WAVY_AMPLITUDE, WAVY_PERIOD};
