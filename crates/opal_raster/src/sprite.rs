//! Sprite evaluation: monochrome glyphs and polychrome images
//!
//! Both pipelines resolve their tile to a normalized atlas coordinate and
//! sample unconditionally before any clipping decision is applied above;
//! filtered texture reads on the native target must not sit behind
//! data-dependent branches.

use crate::atlas::AtlasProvider;
use crate::rasterizer::{EvalContext, PrimitiveEvaluator};
use crate::scene::{MonochromeSprite, PolychromeSprite};
use opal_core::{Bounds, Point, Rgba};

/// Perceptual luminance weights for grayscale conversion
const GRAYSCALE_WEIGHTS: (f32, f32, f32) = (0.2126, 0.7152, 0.0722);

fn unit_position(bounds: Bounds, point: Point) -> Point {
    Point::new(
        (point.x - bounds.origin.x) / bounds.size.width.max(f32::EPSILON),
        (point.y - bounds.origin.y) / bounds.size.height.max(f32::EPSILON),
    )
}

/// Tinted coverage of a glyph sprite: the atlas carries coverage in its red
/// channel, the sprite's flat color carries the tint.
pub fn evaluate_monochrome_sprite(
    sprite: &MonochromeSprite,
    point: Point,
    atlas: &dyn AtlasProvider,
) -> (Rgba, f32) {
    let Some(texture) = atlas.texture(sprite.tile.texture_id) else {
        tracing::warn!(texture_id = ?sprite.tile.texture_id, "atlas texture missing for sprite");
        return (Rgba::TRANSPARENT, 0.0);
    };

    let uv = sprite.tile.uv(unit_position(sprite.bounds, point), texture.size());
    let coverage = texture.sample(uv).r;
    (sprite.color.to_rgba(), coverage)
}

/// Sampled color of an image sprite, optionally collapsed to luminance,
/// scaled by the sprite's opacity.
pub fn evaluate_polychrome_sprite(
    sprite: &PolychromeSprite,
    point: Point,
    atlas: &dyn AtlasProvider,
) -> (Rgba, f32) {
    let Some(texture) = atlas.texture(sprite.tile.texture_id) else {
        tracing::warn!(texture_id = ?sprite.tile.texture_id, "atlas texture missing for sprite");
        return (Rgba::TRANSPARENT, 0.0);
    };

    let uv = sprite.tile.uv(unit_position(sprite.bounds, point), texture.size());
    let mut color = texture.sample(uv);
    if sprite.grayscale {
        let (wr, wg, wb) = GRAYSCALE_WEIGHTS;
        let luminance = color.r * wr + color.g * wg + color.b * wb;
        color = Rgba::new(luminance, luminance, luminance, color.a);
    }
    (color, sprite.opacity)
}

impl PrimitiveEvaluator for MonochromeSprite {
    fn project(&self) -> Bounds {
        self.bounds
    }

    fn content_mask(&self) -> Bounds {
        self.content_mask
    }

    fn evaluate(&self, point: Point, ctx: &EvalContext) -> (Rgba, f32) {
        evaluate_monochrome_sprite(self, point, ctx.atlas)
    }
}

impl PrimitiveEvaluator for PolychromeSprite {
    fn project(&self) -> Bounds {
        self.bounds
    }

    fn content_mask(&self) -> Bounds {
        self.content_mask
    }

    fn evaluate(&self, point: Point, ctx: &EvalContext) -> (Rgba, f32) {
        evaluate_polychrome_sprite(self, point, ctx.atlas)
    }
}
