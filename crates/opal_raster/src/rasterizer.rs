//! Ordered rasterization of a scene into a frame target
//!
//! Evaluation is a pure map over (primitive, pixel) pairs and could run in
//! any order; the blend into the frame is not commutative, so contributions
//! are composited strictly in submission order, one primitive at a time.

use crate::atlas::AtlasProvider;
use crate::blend::blend_color;
use crate::clip::{distances_at, is_clipped, project_bounds};
use crate::frame::{Frame, FrameParams, RasterError};
use crate::path::{PathFill, PathTriangle};
use crate::scene::{
    MonochromeSprite, Path, PolychromeSprite, PrimitiveBatch, Quad, Scene, Shadow, Underline,
};
use opal_core::{Bounds, Point, Rgba};
use smallvec::SmallVec;

/// Quality knobs for the software rasterizer
#[derive(Clone, Copy, Debug)]
pub struct RasterConfig {
    /// Vertical sample count of the shadow blur integral. Four is the
    /// shipping tradeoff; raising it sharpens large blurs at linear cost.
    pub shadow_samples: usize,
}

impl RasterConfig {
    pub fn with_shadow_samples(mut self, samples: usize) -> Self {
        self.shadow_samples = samples.max(1);
        self
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { shadow_samples: 4 }
    }
}

/// Per-call context threaded through every evaluation
pub struct EvalContext<'a> {
    pub params: &'a FrameParams,
    pub config: &'a RasterConfig,
    pub atlas: &'a dyn AtlasProvider,
}

/// Contract every primitive pipeline implements: a geometry stage producing
/// the covered region and a per-pixel stage producing color and coverage.
pub trait PrimitiveEvaluator {
    /// Logical-space region this primitive can cover, including any
    /// geometry expansion (blur support, wave amplitude)
    fn project(&self) -> Bounds;

    /// Clip rectangle beyond which pixels are discarded
    fn content_mask(&self) -> Bounds;

    /// Color and coverage at a device-space point
    fn evaluate(&self, point: Point, ctx: &EvalContext) -> (Rgba, f32);
}

/// Walks scenes in submission order and composites into a [`Frame`]
pub struct Rasterizer<'a> {
    frame: &'a mut Frame,
    params: FrameParams,
    config: RasterConfig,
}

impl<'a> Rasterizer<'a> {
    /// The viewport must match the frame target; the software path has no
    /// separate device scale.
    pub fn new(frame: &'a mut Frame, params: FrameParams) -> Result<Self, RasterError> {
        if params.viewport_size.width.round() as u32 != frame.width()
            || params.viewport_size.height.round() as u32 != frame.height()
        {
            return Err(RasterError::ViewportMismatch {
                viewport: params.viewport_size,
                width: frame.width(),
                height: frame.height(),
            });
        }
        Ok(Self {
            frame,
            params,
            config: RasterConfig::default(),
        })
    }

    pub fn with_config(mut self, config: RasterConfig) -> Self {
        self.config = config;
        self
    }

    /// Paint every batch of a scene in submission order
    pub fn draw_scene(&mut self, scene: &Scene, atlas: &dyn AtlasProvider) {
        for batch in scene.batches() {
            match batch {
                PrimitiveBatch::Quads(quads) => self.draw_quads(quads),
                PrimitiveBatch::Shadows(shadows) => self.draw_shadows(shadows),
                PrimitiveBatch::MonochromeSprites(sprites) => {
                    self.draw_monochrome_sprites(sprites, atlas)
                }
                PrimitiveBatch::PolychromeSprites(sprites) => {
                    self.draw_polychrome_sprites(sprites, atlas)
                }
                PrimitiveBatch::Paths(paths) => self.draw_paths(paths),
                PrimitiveBatch::Underlines(underlines) => self.draw_underlines(underlines),
            }
        }
    }

    pub fn draw_quads(&mut self, quads: &[Quad]) {
        tracing::debug!(count = quads.len(), "drawing quads");
        for quad in quads {
            self.draw_primitive(quad, &());
        }
    }

    pub fn draw_shadows(&mut self, shadows: &[Shadow]) {
        tracing::debug!(count = shadows.len(), "drawing shadows");
        for shadow in shadows {
            self.draw_primitive(shadow, &());
        }
    }

    pub fn draw_monochrome_sprites(
        &mut self,
        sprites: &[MonochromeSprite],
        atlas: &dyn AtlasProvider,
    ) {
        tracing::debug!(count = sprites.len(), "drawing monochrome sprites");
        for sprite in sprites {
            self.draw_primitive(sprite, atlas);
        }
    }

    pub fn draw_polychrome_sprites(
        &mut self,
        sprites: &[PolychromeSprite],
        atlas: &dyn AtlasProvider,
    ) {
        tracing::debug!(count = sprites.len(), "drawing polychrome sprites");
        for sprite in sprites {
            self.draw_primitive(sprite, atlas);
        }
    }

    pub fn draw_paths(&mut self, paths: &[Path]) {
        tracing::debug!(count = paths.len(), "drawing paths");
        for path in paths {
            for chunk in path.vertices.chunks_exact(3) {
                let Some(triangle) = PathTriangle::new([chunk[0], chunk[1], chunk[2]]) else {
                    continue;
                };
                self.draw_primitive(&PathFill::new(triangle, path), &());
            }
        }
    }

    /// Straight and wavy underlines run as two separate pipelines
    pub fn draw_underlines(&mut self, underlines: &[Underline]) {
        let straight: SmallVec<[&Underline; 8]> =
            underlines.iter().filter(|u| !u.wavy).collect();
        let wavy: SmallVec<[&Underline; 8]> = underlines.iter().filter(|u| u.wavy).collect();
        tracing::debug!(
            straight = straight.len(),
            wavy = wavy.len(),
            "drawing underlines"
        );
        for underline in straight.into_iter().chain(wavy) {
            self.draw_primitive(underline, &());
        }
    }

    fn draw_primitive(&mut self, primitive: &dyn PrimitiveEvaluator, atlas: &dyn AtlasProvider) {
        let viewport = Bounds::from_origin_size(Point::ZERO, self.params.viewport_size);
        let device_bounds = project_bounds(primitive.project(), self.params.viewport_size);
        let mask = primitive.content_mask();

        let Some(scissor) = device_bounds
            .intersection(&mask)
            .and_then(|bounds| bounds.intersection(&viewport))
        else {
            return;
        };

        let x0 = scissor.origin.x.floor().max(0.0) as u32;
        let y0 = scissor.origin.y.floor().max(0.0) as u32;
        let x1 = (scissor.right().ceil().max(0.0) as u32).min(self.frame.width());
        let y1 = (scissor.bottom().ceil().max(0.0) as u32).min(self.frame.height());

        let premultiplied = self.params.premultiplied();
        let ctx = EvalContext {
            params: &self.params,
            config: &self.config,
            atlas,
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let point = Point::new(x as f32 + 0.5, y as f32 + 0.5);

                // Evaluate before the clip test; the sprite pipelines must
                // issue their texture sample unconditionally
                let (color, coverage) = primitive.evaluate(point, &ctx);
                if is_clipped(distances_at(point, mask)) {
                    continue;
                }

                let source = blend_color(color, coverage, premultiplied);
                if source.a == 0.0 {
                    continue;
                }
                self.frame.composite(x, y, source, premultiplied);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opal_core::{Hsla, Size};

    fn frame_100() -> Frame {
        Frame::new(100, 100).unwrap()
    }

    fn params_100() -> FrameParams {
        FrameParams::new(Size::new(100.0, 100.0), false)
    }

    #[test]
    fn test_viewport_mismatch_rejected() {
        let mut frame = frame_100();
        let params = FrameParams::new(Size::new(200.0, 100.0), false);
        assert!(matches!(
            Rasterizer::new(&mut frame, params),
            Err(RasterError::ViewportMismatch { .. })
        ));
    }

    #[test]
    fn test_quad_fills_pixels() {
        let mut frame = frame_100();
        let mut rasterizer = Rasterizer::new(&mut frame, params_100()).unwrap();
        rasterizer.draw_quads(&[Quad::new(Bounds::new(10.0, 10.0, 20.0, 20.0), Hsla::RED)]);

        let inside = frame.pixel_straight(15, 15);
        assert!((inside.r - 1.0).abs() < 1e-6);
        assert!((inside.a - 1.0).abs() < 1e-6);
        assert_eq!(frame.pixel(50, 50), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_content_mask_discards() {
        let mut frame = frame_100();
        let mut rasterizer = Rasterizer::new(&mut frame, params_100()).unwrap();
        let quad = Quad::new(Bounds::new(0.0, 0.0, 100.0, 100.0), Hsla::RED)
            .with_content_mask(Bounds::new(0.0, 0.0, 50.0, 100.0));
        rasterizer.draw_quads(&[quad]);

        assert!(frame.pixel(10, 10).a > 0.9);
        assert_eq!(frame.pixel(80, 10), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_submission_order_composites_back_to_front() {
        let mut scene = Scene::new();
        scene.push_quad(Quad::new(Bounds::new(0.0, 0.0, 50.0, 50.0), Hsla::RED));
        scene.push_quad(Quad::new(
            Bounds::new(0.0, 0.0, 50.0, 50.0),
            Hsla::BLUE.opacity(0.5),
        ));

        let mut frame = frame_100();
        let mut rasterizer = Rasterizer::new(&mut frame, params_100()).unwrap();
        rasterizer.draw_scene(&scene, &());

        let pixel = frame.pixel_straight(25, 25);
        // Half blue over red
        assert!((pixel.r - 0.5).abs() < 1e-3);
        assert!((pixel.b - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_offscreen_primitive_is_skipped() {
        let mut frame = frame_100();
        let mut rasterizer = Rasterizer::new(&mut frame, params_100()).unwrap();
        rasterizer.draw_quads(&[Quad::new(Bounds::new(500.0, 500.0, 20.0, 20.0), Hsla::RED)]);
        assert_eq!(frame.pixel(99, 99), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_premultiplied_output_mode() {
        let mut frame = frame_100();
        let params = FrameParams::new(Size::new(100.0, 100.0), true);
        let mut rasterizer = Rasterizer::new(&mut frame, params).unwrap();
        rasterizer.draw_quads(&[Quad::new(
            Bounds::new(0.0, 0.0, 100.0, 100.0),
            Hsla::WHITE.opacity(0.5),
        )]);
        let pixel = frame.pixel(50, 50);
        // Stored premultiplied either way; the mode changes the source encode
        assert!((pixel.r - 0.5).abs() < 1e-3);
        assert!((pixel.a - 0.5).abs() < 1e-3);
    }
}
