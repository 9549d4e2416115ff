//! Geometry types shared by every primitive record
//!
//! All types are flat `#[repr(C)]` plain-old-data so the records embedding
//! them can be memcpy'd into GPU-style instance buffers unchanged.

// ─────────────────────────────────────────────────────────────────────────────
// Points and sizes
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point in logical pixels
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn abs(&self) -> Point {
        Point::new(self.x.abs(), self.y.abs())
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// 2D size in logical pixels
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half of both dimensions, the distance from a bounds center to its edges
    pub fn half(&self) -> Size {
        Size::new(self.width * 0.5, self.height * 0.5)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle: origin (top-left) plus size.
///
/// Sizes are expected to be non-negative. A zero-area bounds is legal and
/// degenerates to no coverage during rasterization.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width * 0.5,
            self.origin.y + self.size.height * 0.5,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Grow the bounds outward by `amount` on all four sides
    pub fn dilate(&self, amount: f32) -> Bounds {
        Bounds {
            origin: Point::new(self.origin.x - amount, self.origin.y - amount),
            size: Size::new(
                self.size.width + amount * 2.0,
                self.size.height + amount * 2.0,
            ),
        }
    }

    /// Intersection of two bounds, or `None` when they do not overlap
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let x = self.origin.x.max(other.origin.x);
        let y = self.origin.y.max(other.origin.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Bounds {
            origin: Point::new(x, y),
            size: Size::new(right - x, bottom - y),
        })
    }

    /// Map a unit-square vertex ([0,1]²) onto this bounds
    pub fn unit_to_point(&self, unit_vertex: Point) -> Point {
        Point::new(
            self.origin.x + unit_vertex.x * self.size.width,
            self.origin.y + unit_vertex.y * self.size.height,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Corner radii and border edges
// ─────────────────────────────────────────────────────────────────────────────

/// Per-corner radii (top-left, top-right, bottom-right, bottom-left).
///
/// A radius of zero means a square corner. Which radius applies to a point is
/// decided by the quadrant sign of the point relative to the shape center.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Corners {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl Corners {
    pub const ZERO: Corners = Corners {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub const fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

impl From<f32> for Corners {
    fn from(radius: f32) -> Self {
        Corners::all(radius)
    }
}

/// Per-side border widths (top, right, bottom, left). Zero disables that side.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn all(width: f32) -> Self {
        Self {
            top: width,
            right: width,
            bottom: width,
            left: width,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

impl From<f32> for Edges {
    fn from(width: f32) -> Self {
        Edges::all(width)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sprite transform
// ─────────────────────────────────────────────────────────────────────────────

/// 2x2 rotation/scale plus translation, applied to sprite geometry upstream.
///
/// Carried in the sprite records so their layout matches the upload format;
/// the evaluators themselves see positions that are already transformed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformationMatrix {
    /// Row-major 2x2 rotation/scale block
    pub rotation_scale: [[f32; 2]; 2],
    pub translation: [f32; 2],
}

impl TransformationMatrix {
    pub const IDENTITY: TransformationMatrix = TransformationMatrix {
        rotation_scale: [[1.0, 0.0], [0.0, 1.0]],
        translation: [0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            translation: [x, y],
            ..Self::IDENTITY
        }
    }

    pub fn rotation(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            rotation_scale: [[c, -s], [s, c]],
            translation: [0.0, 0.0],
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        let [[a, b], [c, d]] = self.rotation_scale;
        let [tx, ty] = self.translation;
        Point::new(
            a * point.x + b * point.y + tx,
            c * point.x + d * point.y + ty,
        )
    }
}

impl Default for TransformationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(bounds.contains(Point::new(10.0, 20.0)));
        assert!(bounds.contains(Point::new(110.0, 70.0)));
        assert!(!bounds.contains(Point::new(9.9, 20.0)));
        assert!(!bounds.contains(Point::new(50.0, 70.1)));
    }

    #[test]
    fn test_bounds_dilate() {
        let bounds = Bounds::new(10.0, 10.0, 20.0, 20.0).dilate(5.0);
        assert_eq!(bounds, Bounds::new(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_bounds_intersection() {
        let a = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let b = Bounds::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Bounds::new(50.0, 50.0, 50.0, 50.0)));

        let c = Bounds::new(200.0, 200.0, 10.0, 10.0);
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_zero_area_bounds_is_empty() {
        assert!(Bounds::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Bounds::new(5.0, 5.0, 10.0, 0.0).is_empty());
        assert!(!Bounds::new(5.0, 5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_unit_to_point() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bounds.unit_to_point(Point::new(0.0, 0.0)), bounds.origin);
        assert_eq!(
            bounds.unit_to_point(Point::new(1.0, 1.0)),
            Point::new(110.0, 70.0)
        );
        assert_eq!(
            bounds.unit_to_point(Point::new(0.5, 0.5)),
            bounds.center()
        );
    }

    #[test]
    fn test_transform_rotation() {
        let transform = TransformationMatrix::rotation(std::f32::consts::FRAC_PI_2);
        let rotated = transform.apply(Point::new(1.0, 0.0));
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }
}
