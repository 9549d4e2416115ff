//! Rounded, bordered quad evaluation
//!
//! The workhorse of the renderer. Two exact fast paths skip the SDF entirely;
//! everything else computes an outer signed distance for edge antialiasing
//! and, when a border applies, an inner signed distance that ramps between
//! the border color and the fill across the border's inner boundary.

use crate::blend::over;
use crate::gradient::background_color;
use crate::rasterizer::{EvalContext, PrimitiveEvaluator};
use crate::scene::Quad;
use crate::sdf::{pick_corner_radius, rounded_rect_sdf};
use opal_core::{Bounds, Point, Rgba};

/// Midpoint of the half-pixel antialiasing ramp used by every SDF evaluator
pub const ANTIALIAS_THRESHOLD: f32 = 0.5;

/// Color and coverage of a quad at a device-space point
pub fn evaluate_quad(quad: &Quad, point: Point) -> (Rgba, f32) {
    let half_size = quad.bounds.size.half();
    let center = quad.bounds.center();
    let center_to_point = point - center;
    let background = background_color(&quad.background, point, quad.bounds);

    // Fast path: plain rectangle with no border. Exact coverage, no SDF.
    if quad.corner_radii.is_zero() && quad.border_widths.is_zero() {
        let coverage = if quad.bounds.contains(point) { 1.0 } else { 0.0 };
        return (background, coverage);
    }

    let corner_radius = pick_corner_radius(center_to_point, quad.corner_radii)
        .min(half_size.width.min(half_size.height));

    // Border widths that apply in this point's quadrant
    let border = Point::new(
        if center_to_point.x < 0.0 {
            quad.border_widths.left
        } else {
            quad.border_widths.right
        },
        if center_to_point.y < 0.0 {
            quad.border_widths.top
        } else {
            quad.border_widths.bottom
        },
    );

    let corner_to_point = center_to_point.abs() - Point::new(half_size.width, half_size.height);
    let corner_center_to_point = corner_to_point + Point::new(corner_radius, corner_radius);

    // Fast path: clear of the corner circle and past the border's inner edge
    // by more than the antialiasing ramp, where the fill is flat
    if corner_center_to_point.x < 0.0
        && corner_center_to_point.y < 0.0
        && corner_to_point.x + border.x < -ANTIALIAS_THRESHOLD
        && corner_to_point.y + border.y < -ANTIALIAS_THRESHOLD
    {
        return (background, 1.0);
    }

    // Signed distance to the outer boundary, negative inside
    let outer_sdf = rounded_rect_sdf(center_to_point, half_size, corner_radius);

    // Which border width separates this point from the nearest outer edge.
    // Inside the inset rectangle no border applies; otherwise the larger
    // inset-corner component decides between the horizontal and vertical side.
    let inset_size = Point::new(
        half_size.width - corner_radius - border.x,
        half_size.height - corner_radius - border.y,
    );
    let point_to_inset_corner = center_to_point.abs() - inset_size;
    let border_width = if point_to_inset_corner.x < 0.0 && point_to_inset_corner.y < 0.0 {
        0.0
    } else if point_to_inset_corner.y > point_to_inset_corner.x {
        border.y
    } else {
        border.x
    };

    let mut color = background;
    if border_width > 0.0 {
        // Distance to the border's inner boundary: the outer distance pushed
        // inward by the applicable width. Negative inside the fill region.
        let inner_sdf = outer_sdf + border_width;

        // Border composited over the fill, fading back to the fill across
        // the inner antialiasing ramp
        let blended_border = over(background, quad.border_color.to_rgba());
        color = blended_border.mix(
            background,
            (ANTIALIAS_THRESHOLD - inner_sdf).clamp(0.0, 1.0),
        );
    }

    (color, (ANTIALIAS_THRESHOLD - outer_sdf).clamp(0.0, 1.0))
}

impl PrimitiveEvaluator for Quad {
    fn project(&self) -> Bounds {
        self.bounds
    }

    fn content_mask(&self) -> Bounds {
        self.content_mask
    }

    fn evaluate(&self, point: Point, _ctx: &EvalContext) -> (Rgba, f32) {
        evaluate_quad(self, point)
    }
}
