//! Blurred rounded-rectangle shadows
//!
//! A closed-form approximation of convolving the rounded-rect mask with a
//! Gaussian: the horizontal dimension integrates analytically through the
//! error function, and the vertical dimension is sampled with a handful of
//! Gaussian-weighted slices. The geometry stage expands the shadow's bounds
//! by three sigma on every side so the penumbra is not cut off.

use crate::rasterizer::{EvalContext, PrimitiveEvaluator};
use crate::scene::Shadow;
use crate::sdf::pick_corner_radius;
use opal_core::{Bounds, Point, Rgba, Size};

/// Effective support of the blur kernel, in sigmas
pub const BLUR_SUPPORT: f32 = 3.0;

/// Sigma floor that keeps the erf argument finite for unblurred shadows
const MIN_BLUR_SIGMA: f32 = 1e-3;

/// Error function approximation: degree-4 polynomial in |x|, sign-corrected.
/// Worst-case absolute error is below 5e-4, invisible at 8-bit output.
pub fn erf(x: f32) -> f32 {
    let s = x.signum();
    let a = x.abs();
    let mut p = 1.0 + a * (0.278393 + a * (0.230389 + a * (0.000972 + a * 0.078108)));
    p *= p;
    p *= p;
    s - s / p
}

/// Normalized Gaussian density
fn gaussian(x: f32, sigma: f32) -> f32 {
    (-x * x / (2.0 * sigma * sigma)).exp() / ((std::f32::consts::TAU).sqrt() * sigma)
}

/// Analytic horizontal blur of the rounded-rect mask for the slice at
/// vertical offset `y` from the shape center.
///
/// The slice's half width is the straight half width, shortened where the
/// slice crosses the corner circle.
fn blur_along_x(x: f32, y: f32, sigma: f32, corner: f32, half_size: Size) -> f32 {
    let delta = (half_size.height - corner - y.abs()).min(0.0);
    let curved = half_size.width - corner + (corner * corner - delta * delta).max(0.0).sqrt();
    let inv = std::f32::consts::FRAC_1_SQRT_2 / sigma;
    0.5 * (erf((x + curved) * inv) - erf((x - curved) * inv))
}

/// Accumulated blur coverage of a shadow at a device-space point.
///
/// `samples` trades quality for cost; the vertical integral converges
/// surprisingly fast because the integrand is smooth.
pub fn evaluate_shadow(shadow: &Shadow, point: Point, samples: usize) -> (Rgba, f32) {
    let half_size = shadow.bounds.size.half();
    let center = shadow.bounds.center();
    let center_to_point = point - center;

    let corner_radius = pick_corner_radius(center_to_point, shadow.corner_radii)
        .min(half_size.width.min(half_size.height));
    let sigma = shadow.blur_radius.max(MIN_BLUR_SIGMA);

    // The mask is only non-zero over the shape's vertical span, so clamp the
    // kernel support to it rather than wasting samples
    let low = center_to_point.y - half_size.height;
    let high = center_to_point.y + half_size.height;
    let start = (-BLUR_SUPPORT * sigma).clamp(low, high);
    let end = (BLUR_SUPPORT * sigma).clamp(low, high);

    let step = (end - start) / samples as f32;
    let mut y = start + step * 0.5;
    let mut alpha = 0.0;
    for _ in 0..samples {
        alpha += blur_along_x(
            center_to_point.x,
            center_to_point.y - y,
            sigma,
            corner_radius,
            half_size,
        ) * gaussian(y, sigma)
            * step;
        y += step;
    }

    (shadow.color.to_rgba(), alpha)
}

impl PrimitiveEvaluator for Shadow {
    fn project(&self) -> Bounds {
        self.bounds.dilate(self.blur_radius * BLUR_SUPPORT)
    }

    fn content_mask(&self) -> Bounds {
        self.content_mask
    }

    fn evaluate(&self, point: Point, ctx: &EvalContext) -> (Rgba, f32) {
        evaluate_shadow(self, point, ctx.config.shadow_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opal_core::Hsla;

    fn shadow(blur: f32) -> Shadow {
        Shadow::new(Bounds::new(0.0, 0.0, 40.0, 40.0), blur, Hsla::BLACK).with_corner_radii(4.0)
    }

    #[test]
    fn test_erf_reference_values() {
        assert!(erf(0.0).abs() < 1e-6);
        assert!((erf(1.0) - 0.8427).abs() < 1e-3);
        assert!((erf(2.0) - 0.9953).abs() < 1e-3);
        assert!((erf(-1.0) + erf(1.0)).abs() < 1e-6);
        assert!(erf(5.0) <= 1.0);
    }

    #[test]
    fn test_gaussian_normalizes() {
        let sigma = 2.0;
        let mut total = 0.0;
        let step = 0.01;
        let mut x = -5.0 * sigma;
        while x < 5.0 * sigma {
            total += gaussian(x, sigma) * step;
            x += step;
        }
        assert!((total - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_center_is_maximal() {
        let shadow = shadow(4.0);
        let (_, center) = evaluate_shadow(&shadow, Point::new(20.0, 20.0), 4);
        for probe in [
            Point::new(30.0, 20.0),
            Point::new(20.0, 35.0),
            Point::new(45.0, 45.0),
        ] {
            let (_, alpha) = evaluate_shadow(&shadow, probe, 4);
            assert!(alpha <= center + 1e-4, "alpha at {probe:?} exceeded center");
        }
    }

    #[test]
    fn test_alpha_decreases_moving_away() {
        let shadow = shadow(4.0);
        let mut previous = f32::INFINITY;
        for i in 0..12 {
            let x = 20.0 + i as f32 * 4.0;
            let (_, alpha) = evaluate_shadow(&shadow, Point::new(x, 20.0), 4);
            assert!(alpha <= previous + 1e-4);
            previous = alpha;
        }
    }

    #[test]
    fn test_tiny_blur_approaches_hard_mask() {
        let shadow = shadow(0.0);
        let (_, inside) = evaluate_shadow(&shadow, Point::new(20.0, 20.0), 4);
        let (_, outside) = evaluate_shadow(&shadow, Point::new(60.0, 20.0), 4);
        assert!(inside > 0.95, "inside alpha was {inside}");
        assert!(outside < 0.05, "outside alpha was {outside}");
    }

    #[test]
    fn test_penumbra_extends_past_bounds() {
        let shadow = shadow(8.0);
        let (_, alpha) = evaluate_shadow(&shadow, Point::new(44.0, 20.0), 4);
        assert!(alpha > 0.01, "penumbra alpha was {alpha}");
        assert!(shadow.project().contains(Point::new(44.0, 20.0)));
    }

    #[test]
    fn test_more_samples_agree_with_few() {
        let shadow = shadow(6.0);
        let probe = Point::new(28.0, 8.0);
        let (_, coarse) = evaluate_shadow(&shadow, probe, 4);
        let (_, fine) = evaluate_shadow(&shadow, probe, 64);
        assert!((coarse - fine).abs() < 0.05, "coarse {coarse} vs fine {fine}");
    }
}
