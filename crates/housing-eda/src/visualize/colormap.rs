//! Diverging colour scale for correlation coefficients.

use palette::{LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

// Cool-warm endpoints and midpoint
const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Colour for undefined coefficients.
pub(crate) const UNDEFINED_COLOR: RGBColor = RGBColor(128, 128, 128);

fn linear(rgb: (u8, u8, u8)) -> LinSrgb {
    Srgb::new(rgb.0, rgb.1, rgb.2).into_format::<f32>().into_linear()
}

/// Map a coefficient in `[-1, 1]` onto a diverging blue-grey-red scale.
///
/// Zero maps to the neutral midpoint; values outside the range are clamped
/// and `NaN` maps to a flat grey.
pub fn diverging_color(value: f64) -> RGBColor {
    if value.is_nan() {
        return UNDEFINED_COLOR;
    }

    let t = value.clamp(-1.0, 1.0) as f32;
    let mixed = if t < 0.0 {
        linear(COOL).mix(linear(NEUTRAL), t + 1.0)
    } else {
        linear(NEUTRAL).mix(linear(WARM), t)
    };

    let out: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    RGBColor(out.red, out.green, out.blue)
}
