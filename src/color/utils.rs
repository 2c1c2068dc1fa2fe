use core::fmt::Write;

use heapless::String;
pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    fixed::{Fraction, lerp8},
};

/// `#rrggbb`
pub type HexString = String<7>;

/// Blend two RGB colors component-wise
///
/// # Arguments
/// * `a` - Color at `t = 0`
/// * `b` - Color at `t = 1`
/// * `t` - Blend factor
#[inline]
pub const fn lerp(a: Rgb, b: Rgb, t: Fraction) -> Rgb {
    Rgb {
        r: lerp8(a.r, b.r, t),
        g: lerp8(a.g, b.g, t),
        b: lerp8(a.b, b.b, t),
    }
}

/// Color from hue, saturation and value (all 0-255, hue on a 0-255 circle)
///
/// Integer-only conversion, identical on every target.
#[inline]
pub fn from_hsv(hue: u8, sat: u8, val: u8) -> Rgb {
    hsv2rgb(Hsv { hue, sat, val })
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Format a color as `#rrggbb`
pub fn to_hex(color: Rgb) -> HexString {
    let mut out = HexString::new();
    // Seven bytes always fit
    let _ = write!(out, "#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    out
}

/// Parse `#rrggbb` (the leading `#` is optional)
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(rgb_from_u32(value))
}

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let val = max;
    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    // Sector offsets 0, 85 and 171 split the 0-255 circle in thirds
    let hue = if delta == 0 {
        0
    } else {
        let (offset, x, y) = if max == r {
            (0i16, g, b)
        } else if max == g {
            (85, b, r)
        } else {
            (171, r, g)
        };
        let h = offset + (43i16 * (i16::from(x) - i16::from(y))) / i16::from(delta);
        h.rem_euclid(256) as u8
    };

    Hsv { hue, sat, val }
}
