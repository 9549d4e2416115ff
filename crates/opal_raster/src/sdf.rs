//! Signed distance to rounded-rectangle boundaries
//!
//! Distances are negative inside the shape and positive outside, so the
//! 0.5px antialiasing ramp the evaluators apply is `saturate(0.5 - distance)`.

use opal_core::{Corners, Point, Size};

/// Select the corner radius for the quadrant a point falls in, relative to
/// the shape center. Screen coordinates, so negative y is the top half.
pub fn pick_corner_radius(center_to_point: Point, corners: Corners) -> f32 {
    if center_to_point.y < 0.0 {
        if center_to_point.x < 0.0 {
            corners.top_left
        } else {
            corners.top_right
        }
    } else if center_to_point.x < 0.0 {
        corners.bottom_left
    } else {
        corners.bottom_right
    }
}

/// Signed distance from a point to the boundary of a rounded rectangle.
///
/// `center_to_point` is the point relative to the rectangle center and
/// `corner_radius` is the radius already selected for the point's quadrant.
/// Straight edges use the cheap max form; only the corner region pays for a
/// Euclidean distance to the inset corner circle.
pub fn rounded_rect_sdf(center_to_point: Point, half_size: Size, corner_radius: f32) -> f32 {
    // Point relative to the corner, axes pointing toward the rectangle center
    let corner_to_point = center_to_point.abs() - Point::new(half_size.width, half_size.height);
    let corner_center_to_point = corner_to_point + Point::new(corner_radius, corner_radius);

    if corner_center_to_point.x <= 0.0 || corner_center_to_point.y <= 0.0 {
        corner_to_point.x.max(corner_to_point.y)
    } else {
        corner_center_to_point.length() - corner_radius
    }
}
