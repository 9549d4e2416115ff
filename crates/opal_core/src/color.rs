//! Color types and conversions
//!
//! Style colors are authored as [`Hsla`] and converted to linear [`Rgba`]
//! lazily at evaluation time. The sRGB and Oklab conversions exist for
//! gradient interpolation, where the interpolation color space is part of the
//! primitive's declared style and changing the conversion order is a visible
//! correctness bug.
//!
//! Every function here is pure and produces the same bits for the same inputs.

// ─────────────────────────────────────────────────────────────────────────────
// HSLA
// ─────────────────────────────────────────────────────────────────────────────

/// HSLA color with all components normalized to [0, 1].
///
/// Hue is a fraction of a full turn, not degrees.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const TRANSPARENT: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 0.0,
    };
    pub const BLACK: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 1.0,
    };
    pub const WHITE: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 1.0,
        a: 1.0,
    };
    pub const RED: Hsla = Hsla {
        h: 0.0,
        s: 1.0,
        l: 0.5,
        a: 1.0,
    };
    pub const GREEN: Hsla = Hsla {
        h: 1.0 / 3.0,
        s: 1.0,
        l: 0.5,
        a: 1.0,
    };
    pub const BLUE: Hsla = Hsla {
        h: 2.0 / 3.0,
        s: 1.0,
        l: 0.5,
        a: 1.0,
    };

    /// Create a color with all components clamped into [0, 1].
    ///
    /// The sextant selection in [`Hsla::to_rgba`] does not wrap hue, so
    /// normalizing at construction keeps out-of-range inputs from silently
    /// landing in the last sextant.
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self {
            h: h.clamp(0.0, 1.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn opacity(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Standard HSL to RGB conversion via the six hue sextants.
    ///
    /// The last sextant is the `else` branch, so a hue at exactly 1.0 (or any
    /// hue past the fifth sextant) uses the sextant-5 formula.
    pub fn to_rgba(self) -> Rgba {
        let h = self.h * 6.0;
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = self.l - c / 2.0;

        let (r, g, b) = if h < 1.0 {
            (c, x, 0.0)
        } else if h < 2.0 {
            (x, c, 0.0)
        } else if h < 3.0 {
            (0.0, c, x)
        } else if h < 4.0 {
            (0.0, x, c)
        } else if h < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Rgba {
            r: r + m,
            g: g + m,
            b: b + m,
            a: self.a,
        }
    }
}

/// Inverse of [`Hsla::to_rgba`].
///
/// Hue is undefined at zero saturation and saturation is undefined at
/// lightness 0 or 1; both come back as 0 there.
pub fn rgba_to_hsla(color: Rgba) -> Hsla {
    let max = color.r.max(color.g).max(color.b);
    let min = color.r.min(color.g).min(color.b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsla {
            h: 0.0,
            s: 0.0,
            l,
            a: color.a,
        };
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let mut h = if max == color.r {
        ((color.g - color.b) / delta).rem_euclid(6.0)
    } else if max == color.g {
        (color.b - color.r) / delta + 2.0
    } else {
        (color.r - color.g) / delta + 4.0
    } / 6.0;
    if h >= 1.0 {
        h -= 1.0;
    }

    Hsla {
        h,
        s,
        l,
        a: color.a,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RGBA
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA working color. Channels are unclamped f32 so intermediate blend math
/// keeps precision; the frame target clamps on read-out.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Component-wise linear interpolation, `t` clamped to [0, 1]
    pub fn mix(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// sRGB transfer function
// ─────────────────────────────────────────────────────────────────────────────

fn channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn channel_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Decode sRGB-encoded channels to linear light. Alpha is untouched.
pub fn srgb_to_linear(color: Rgba) -> Rgba {
    Rgba {
        r: channel_to_linear(color.r),
        g: channel_to_linear(color.g),
        b: channel_to_linear(color.b),
        a: color.a,
    }
}

/// Encode linear-light channels as sRGB. Alpha is untouched.
pub fn linear_to_srgb(color: Rgba) -> Rgba {
    Rgba {
        r: channel_to_srgb(color.r),
        g: channel_to_srgb(color.g),
        b: channel_to_srgb(color.b),
        a: color.a,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Oklab
// ─────────────────────────────────────────────────────────────────────────────

/// Oklab color, used for perceptually uniform gradient interpolation
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Oklab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
    pub alpha: f32,
}

/// Linear sRGB to Oklab, using the published Oklab matrices
pub fn linear_srgb_to_oklab(color: Rgba) -> Oklab {
    let l = 0.412_214_7 * color.r + 0.536_332_54 * color.g + 0.051_445_995 * color.b;
    let m = 0.211_903_5 * color.r + 0.680_699_5 * color.g + 0.107_396_96 * color.b;
    let s = 0.088_302_46 * color.r + 0.281_718_85 * color.g + 0.629_978_7 * color.b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.210_454_26 * l_ + 0.793_617_8 * m_ - 0.004_072_047 * s_,
        a: 1.977_998_5 * l_ - 2.428_592_2 * m_ + 0.450_593_7 * s_,
        b: 0.025_904_037 * l_ + 0.782_771_77 * m_ - 0.808_675_77 * s_,
        alpha: color.a,
    }
}

/// Oklab back to linear sRGB
pub fn oklab_to_linear_srgb(color: Oklab) -> Rgba {
    let l_ = color.l + 0.396_337_78 * color.a + 0.215_803_76 * color.b;
    let m_ = color.l - 0.105_561_346 * color.a - 0.063_854_17 * color.b;
    let s_ = color.l - 0.089_484_18 * color.a - 1.291_485_5 * color.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    Rgba {
        r: 4.076_741_7 * l - 3.307_711_6 * m + 0.230_969_94 * s,
        g: -1.268_438 * l + 2.609_757_4 * m - 0.341_319_38 * s,
        b: -0.004_196_086_3 * l - 0.703_418_6 * m + 1.707_614_7 * s,
        a: color.alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsla_primaries() {
        let red = Hsla::RED.to_rgba();
        assert!((red.r - 1.0).abs() < 1e-6);
        assert!(red.g.abs() < 1e-6);
        assert!(red.b.abs() < 1e-6);

        let green = Hsla::GREEN.to_rgba();
        assert!(green.r.abs() < 1e-6);
        assert!((green.g - 1.0).abs() < 1e-6);

        let blue = Hsla::BLUE.to_rgba();
        assert!((blue.b - 1.0).abs() < 1e-6);
        assert!(blue.r.abs() < 1e-6);
    }

    #[test]
    fn test_hsla_channels_in_range() {
        for h in 0..=10 {
            for s in 0..=4 {
                for l in 0..=4 {
                    let color = Hsla::new(h as f32 / 10.0, s as f32 / 4.0, l as f32 / 4.0, 1.0);
                    let rgba = color.to_rgba();
                    for channel in [rgba.r, rgba.g, rgba.b, rgba.a] {
                        assert!(
                            (0.0..=1.0).contains(&channel),
                            "channel {channel} out of range for {color:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_hsla_round_trip() {
        for (h, s, l) in [(0.1, 0.8, 0.4), (0.35, 0.5, 0.6), (0.62, 0.9, 0.3), (0.9, 0.2, 0.7)] {
            let original = Hsla::new(h, s, l, 1.0);
            let back = rgba_to_hsla(original.to_rgba());
            assert!((back.h - h).abs() < 1e-3, "hue {h} round-tripped to {}", back.h);
            assert!((back.s - s).abs() < 1e-3);
            assert!((back.l - l).abs() < 1e-3);
        }
    }

    #[test]
    fn test_hue_fallthrough_matches_last_sextant() {
        // Hue exactly 1.0 lands in the else branch and behaves like sextant 5.
        let wrapped = Hsla {
            h: 1.0,
            s: 1.0,
            l: 0.5,
            a: 1.0,
        }
        .to_rgba();
        assert!((wrapped.r - 1.0).abs() < 1e-5);
        assert!(wrapped.g.abs() < 1e-5);
    }

    #[test]
    fn test_srgb_round_trip() {
        for i in 0..=20 {
            let x = i as f32 / 20.0;
            let color = Rgba::new(x, x, x, 1.0);
            let back = srgb_to_linear(linear_to_srgb(color));
            assert!((back.r - x).abs() < 1e-5, "srgb round trip failed at {x}");
        }
    }

    #[test]
    fn test_srgb_threshold_continuity() {
        let below = channel_to_linear(0.04044);
        let above = channel_to_linear(0.04046);
        assert!((below - above).abs() < 1e-4);
    }

    #[test]
    fn test_oklab_round_trip() {
        for (r, g, b) in [
            (0.0, 0.0, 0.0),
            (1.0, 1.0, 1.0),
            (1.0, 0.0, 0.0),
            (0.2, 0.6, 0.9),
            (0.7, 0.3, 0.1),
        ] {
            let color = Rgba::new(r, g, b, 1.0);
            let back = oklab_to_linear_srgb(linear_srgb_to_oklab(color));
            assert!((back.r - r).abs() < 1e-4, "r {r} came back as {}", back.r);
            assert!((back.g - g).abs() < 1e-4);
            assert!((back.b - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_oklab_white_is_unit_lightness() {
        let lab = linear_srgb_to_oklab(Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert!((lab.l - 1.0).abs() < 1e-3);
        assert!(lab.a.abs() < 1e-3);
        assert!(lab.b.abs() < 1e-3);
    }

    #[test]
    fn test_new_clamps_components() {
        let color = Hsla::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(color.h, 1.0);
        assert_eq!(color.s, 0.0);
        assert_eq!(color.a, 1.0);
    }
}
