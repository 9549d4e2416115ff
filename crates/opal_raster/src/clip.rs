//! Device projection and rectangular clipping
//!
//! The geometry stage of every pipeline maps a primitive's (possibly
//! expanded) bounds through a unit quad into normalized device coordinates,
//! and hands the per-pixel stage four signed distances to the clip rectangle.
//! A single negative distance means the pixel is outside its content mask and
//! contributes nothing.

use opal_core::{Bounds, Point, Size};

/// Map a unit-quad vertex against a primitive's bounds into normalized device
/// coordinates. Inputs are top-left origin, so y is flipped into NDC.
pub fn to_device_position(unit_vertex: Point, bounds: Bounds, viewport_size: Size) -> [f32; 4] {
    let position = bounds.unit_to_point(unit_vertex);
    let device_x = position.x / viewport_size.width * 2.0 - 1.0;
    let device_y = 1.0 - position.y / viewport_size.height * 2.0;
    [device_x, device_y, 0.0, 1.0]
}

/// Signed distances from a projected unit-quad vertex to the clip rectangle's
/// left, right, top, and bottom edges.
pub fn distance_from_clip_rect(unit_vertex: Point, bounds: Bounds, clip_bounds: Bounds) -> [f32; 4] {
    distances_at(bounds.unit_to_point(unit_vertex), clip_bounds)
}

/// The same four distances for an already-positioned point
pub fn distances_at(position: Point, clip_bounds: Bounds) -> [f32; 4] {
    [
        position.x - clip_bounds.origin.x,
        clip_bounds.right() - position.x,
        position.y - clip_bounds.origin.y,
        clip_bounds.bottom() - position.y,
    ]
}

/// Whether a set of clip distances puts the point outside the clip rectangle
pub fn is_clipped(distances: [f32; 4]) -> bool {
    distances.iter().any(|&d| d < 0.0)
}

/// Project a bounds through NDC and back to device pixels.
///
/// This is the round trip the native vertex stage and rasterizer perform; the
/// software rasterizer uses it to find the pixel region a primitive covers.
pub fn project_bounds(bounds: Bounds, viewport_size: Size) -> Bounds {
    let [x0, y0, _, _] = to_device_position(Point::new(0.0, 0.0), bounds, viewport_size);
    let [x1, y1, _, _] = to_device_position(Point::new(1.0, 1.0), bounds, viewport_size);

    let left = (x0 + 1.0) * 0.5 * viewport_size.width;
    let top = (1.0 - y0) * 0.5 * viewport_size.height;
    let right = (x1 + 1.0) * 0.5 * viewport_size.width;
    let bottom = (1.0 - y1) * 0.5 * viewport_size.height;

    Bounds::new(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_position_corners() {
        let viewport = Size::new(800.0, 600.0);
        let full = Bounds::new(0.0, 0.0, 800.0, 600.0);

        let top_left = to_device_position(Point::new(0.0, 0.0), full, viewport);
        assert_eq!(&top_left[..2], &[-1.0, 1.0]);

        let bottom_right = to_device_position(Point::new(1.0, 1.0), full, viewport);
        assert_eq!(&bottom_right[..2], &[1.0, -1.0]);

        let center = to_device_position(Point::new(0.5, 0.5), full, viewport);
        assert_eq!(&center[..2], &[0.0, 0.0]);
    }

    #[test]
    fn test_clip_distances_signs() {
        let clip = Bounds::new(10.0, 10.0, 80.0, 80.0);

        let inside = distances_at(Point::new(50.0, 50.0), clip);
        assert!(!is_clipped(inside));

        let left_of = distances_at(Point::new(5.0, 50.0), clip);
        assert!(is_clipped(left_of));
        assert!(left_of[0] < 0.0);

        let below = distances_at(Point::new(50.0, 95.0), clip);
        assert!(is_clipped(below));
        assert!(below[3] < 0.0);
    }

    #[test]
    fn test_unit_vertex_clip_distances() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let clip = Bounds::new(25.0, 0.0, 50.0, 100.0);

        // The quad's left edge projects outside the clip's left edge
        let left = distance_from_clip_rect(Point::new(0.0, 0.5), bounds, clip);
        assert!(is_clipped(left));

        let center = distance_from_clip_rect(Point::new(0.5, 0.5), bounds, clip);
        assert!(!is_clipped(center));
        assert_eq!(center, [25.0, 25.0, 50.0, 50.0]);
    }

    #[test]
    fn test_project_bounds_round_trips() {
        let viewport = Size::new(1024.0, 768.0);
        let bounds = Bounds::new(100.0, 50.0, 300.0, 200.0);
        let projected = project_bounds(bounds, viewport);
        assert!((projected.origin.x - bounds.origin.x).abs() < 1e-3);
        assert!((projected.origin.y - bounds.origin.y).abs() < 1e-3);
        assert!((projected.size.width - bounds.size.width).abs() < 1e-3);
        assert!((projected.size.height - bounds.size.height).abs() < 1e-3);
    }
}
