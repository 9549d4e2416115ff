//! Alpha blending
//!
//! Two operations: scaling a color's alpha by a coverage factor while
//! honoring the frame's premultiplied-alpha mode, and "over" compositing.
//! Alpha blending is not commutative, so the compositor above must apply
//! contributions strictly in submission order.

use opal_core::Rgba;

/// Scale a color's alpha by a coverage factor.
///
/// In premultiplied mode the RGB channels are scaled by the resulting alpha;
/// in straight mode they pass through unchanged. The factor is not clamped
/// here: quad-style callers pass an already saturated ramp, and the shadow
/// integral feeds its accumulated value through directly.
pub fn blend_color(color: Rgba, alpha_factor: f32, premultiplied_alpha: bool) -> Rgba {
    let alpha = color.a * alpha_factor;
    let multiplier = if premultiplied_alpha { alpha } else { 1.0 };
    Rgba {
        r: color.r * multiplier,
        g: color.g * multiplier,
        b: color.b * multiplier,
        a: alpha,
    }
}

/// Composite `above` over `below`, both straight alpha.
pub fn over(below: Rgba, above: Rgba) -> Rgba {
    let alpha = above.a + below.a * (1.0 - above.a);
    // Guard a fully transparent stack so the color stays finite
    let denom = alpha.max(0.001);
    Rgba {
        r: (above.r * above.a + below.r * below.a * (1.0 - above.a)) / denom,
        g: (above.g * above.a + below.g * below.a * (1.0 - above.a)) / denom,
        b: (above.b * above.a + below.b * below.a * (1.0 - above.a)) / denom,
        a: alpha,
    }
}

/// Composite `above` over `below`, both premultiplied.
pub fn over_premultiplied(below: Rgba, above: Rgba) -> Rgba {
    let inverse = 1.0 - above.a;
    Rgba {
        r: above.r + below.r * inverse,
        g: above.g + below.g * inverse,
        b: above.b + below.b * inverse,
        a: above.a + below.a * inverse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_color_straight_keeps_rgb() {
        let color = Rgba::new(0.8, 0.4, 0.2, 1.0);
        let blended = blend_color(color, 0.5, false);
        assert_eq!(blended.r, 0.8);
        assert_eq!(blended.a, 0.5);
    }

    #[test]
    fn test_blend_color_premultiplied_scales_rgb() {
        let color = Rgba::new(0.8, 0.4, 0.2, 0.5);
        let blended = blend_color(color, 0.5, true);
        assert!((blended.a - 0.25).abs() < 1e-6);
        assert!((blended.r - 0.8 * 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_over_opaque_wins() {
        let below = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let above = Rgba::new(0.0, 0.0, 1.0, 1.0);
        let result = over(below, above);
        assert!((result.b - 1.0).abs() < 1e-6);
        assert!(result.r.abs() < 1e-6);
    }

    #[test]
    fn test_over_transparent_above_is_identity() {
        let below = Rgba::new(0.3, 0.6, 0.9, 0.7);
        let result = over(below, Rgba::TRANSPARENT);
        assert!((result.r - below.r).abs() < 1e-5);
        assert!((result.a - below.a).abs() < 1e-6);
    }

    #[test]
    fn test_over_half_blend() {
        let below = Rgba::new(0.0, 0.0, 0.0, 1.0);
        let above = Rgba::new(1.0, 1.0, 1.0, 0.5);
        let result = over(below, above);
        assert!((result.r - 0.5).abs() < 1e-6);
        assert!((result.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_over_premultiplied_accumulates() {
        let below = Rgba::new(0.5, 0.0, 0.0, 0.5);
        let above = Rgba::new(0.0, 0.25, 0.0, 0.25);
        let result = over_premultiplied(below, above);
        assert!((result.a - (0.25 + 0.5 * 0.75)).abs() < 1e-6);
        assert!((result.r - 0.5 * 0.75).abs() < 1e-6);
        assert!((result.g - 0.25).abs() < 1e-6);
    }
}
