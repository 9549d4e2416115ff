//! Background fills: solid colors and two-stop linear gradients
//!
//! Gradient interpolation happens in the color space the primitive declares.
//! The conversion order is part of the contract: interpolating in sRGB or
//! Oklab and converting the result back produces visibly different ramps than
//! mixing linear light, and callers pick the space for exactly that reason.

use crate::scene::{Background, ColorSpace, LinearColorStop};
use opal_core::{
    linear_srgb_to_oklab, linear_to_srgb, oklab_to_linear_srgb, srgb_to_linear, Bounds, Oklab,
    Point, Rgba,
};

/// Guard for near-zero gradient axes and stop spans
const MIN_GRADIENT_SPAN: f32 = 1e-4;

/// Resolve a background to a color at a device-space position
pub fn background_color(background: &Background, position: Point, bounds: Bounds) -> Rgba {
    match background {
        Background::Solid(color) => color.to_rgba(),
        Background::LinearGradient {
            angle,
            stops,
            color_space,
        } => linear_gradient_color(*angle, stops, *color_space, position, bounds),
    }
}

fn linear_gradient_color(
    angle: f32,
    stops: &[LinearColorStop; 2],
    color_space: ColorSpace,
    position: Point,
    bounds: Bounds,
) -> Rgba {
    // Angle is degrees clockwise from vertical; rotate into the usual
    // math convention before taking the direction vector.
    let radians = (angle.rem_euclid(360.0) - 90.0).to_radians();
    let mut direction = Point::new(radians.cos(), radians.sin());

    // Compress the short axis proportionally so the ramp stays visually
    // uniform on non-square bounds
    if bounds.size.width > bounds.size.height {
        direction.y *= bounds.size.height / bounds.size.width.max(MIN_GRADIENT_SPAN);
    } else {
        direction.x *= bounds.size.width / bounds.size.height.max(MIN_GRADIENT_SPAN);
    }

    let axis_length = direction.length();
    if axis_length < MIN_GRADIENT_SPAN {
        return stops[0].color.to_rgba();
    }

    let half = bounds.size.half();
    let center_to_point = position - bounds.center();
    let projected = center_to_point.dot(direction) / axis_length;

    // Normalize along whichever bounds dimension the gradient axis mostly
    // follows
    let mut t = if direction.x.abs() > direction.y.abs() {
        (projected + half.width) / bounds.size.width.max(MIN_GRADIENT_SPAN)
    } else {
        (projected + half.height) / bounds.size.height.max(MIN_GRADIENT_SPAN)
    };

    // Map through the stop percentages
    let span = stops[1].percentage - stops[0].percentage;
    if span.abs() < MIN_GRADIENT_SPAN {
        t = if t < stops[0].percentage { 0.0 } else { 1.0 };
    } else {
        t = (t - stops[0].percentage) / span;
    }
    let t = t.clamp(0.0, 1.0);

    let from = stops[0].color.to_rgba();
    let to = stops[1].color.to_rgba();
    match color_space {
        ColorSpace::Linear => from.mix(to, t),
        ColorSpace::Srgb => {
            let mixed = linear_to_srgb(from).mix(linear_to_srgb(to), t);
            srgb_to_linear(mixed)
        }
        ColorSpace::Oklab => {
            let from = linear_srgb_to_oklab(from);
            let to = linear_srgb_to_oklab(to);
            let mixed = Oklab {
                l: from.l + (to.l - from.l) * t,
                a: from.a + (to.a - from.a) * t,
                b: from.b + (to.b - from.b) * t,
                alpha: from.alpha + (to.alpha - from.alpha) * t,
            };
            oklab_to_linear_srgb(mixed)
        }
    }
}
