//! Straight and wavy underline evaluation
//!
//! Straight underlines are a flat fill clamped to the stroke thickness. Wavy
//! underlines carry a fixed-amplitude sine centerline; the amplitude and
//! period are design constants, not style inputs.

use crate::rasterizer::{EvalContext, PrimitiveEvaluator};
use crate::scene::Underline;
use opal_core::{Bounds, Point, Rgba};

/// Half the peak-to-peak height of the wave, in pixels
pub const WAVY_AMPLITUDE: f32 = 1.5;

/// Horizontal length of one full wave cycle, in pixels
pub const WAVY_PERIOD: f32 = 6.0;

/// Bounds an underline covers after its geometry fixup: straight underlines
/// clamp to the stroke thickness, wavy underlines gain headroom for the wave.
pub fn underline_geometry(underline: &Underline) -> Bounds {
    let mut bounds = underline.bounds;
    if underline.wavy {
        bounds.origin.y -= WAVY_AMPLITUDE;
        bounds.size.height += 2.0 * WAVY_AMPLITUDE;
    } else {
        bounds.size.height = underline.thickness;
    }
    bounds
}

/// Vertical offset of the wave centerline from the expanded bounds' top edge
pub fn wavy_centerline_offset(local_x: f32) -> f32 {
    WAVY_AMPLITUDE + WAVY_AMPLITUDE * (std::f32::consts::TAU * local_x / WAVY_PERIOD).sin()
}

/// Color and coverage of an underline at a device-space point
pub fn evaluate_underline(underline: &Underline, point: Point) -> (Rgba, f32) {
    let color = underline.color.to_rgba();
    let geometry = underline_geometry(underline);

    if !underline.wavy {
        let coverage = if geometry.contains(point) { 1.0 } else { 0.0 };
        return (color, coverage);
    }

    let half_thickness = underline.thickness * 0.5;
    let centerline = wavy_centerline_offset(point.x - geometry.origin.x);
    let distance = (point.y - geometry.origin.y) - centerline;

    // One-pixel feather on both sides of the stroke
    let coverage = (half_thickness - distance.abs() + 0.5).clamp(0.0, 1.0);
    (color, coverage)
}

impl PrimitiveEvaluator for Underline {
    fn project(&self) -> Bounds {
        underline_geometry(self)
    }

    fn content_mask(&self) -> Bounds {
        self.content_mask
    }

    fn evaluate(&self, point: Point, _ctx: &EvalContext) -> (Rgba, f32) {
        evaluate_underline(self, point)
    }
}
