use crate::{
    color::{Hsv, Rgb, hsv2rgb, lerp, rgb2hsv},
    fixed::{Fraction, lerp8},
};

/// Which way around the hue circle a blend travels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueDirection {
    Forward,
    Backward,
    Shortest,
}

/// How a transition between two colors is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Hard cut, no interpolation
    Jump,
    /// Interpolate R, G and B linearly
    #[default]
    Rgb,
    /// Interpolate hue, saturation and value. Passes through extra hues, but
    /// never through the muddy greys an RGB blend can produce.
    Hsv(HueDirection),
}

impl Blend {
    /// Mix `a` towards `b`
    ///
    /// For [`Blend::Jump`] anything short of one stays on `a`.
    pub fn mix(self, a: Rgb, b: Rgb, t: Fraction) -> Rgb {
        match self {
            Self::Jump => {
                if t < Fraction::ONE {
                    a
                } else {
                    b
                }
            }
            Self::Rgb => lerp(a, b, t),
            Self::Hsv(direction) => blend_hsv(a, b, t, direction),
        }
    }
}

/// Blend two colors in HSV space
///
/// A black or grey endpoint has no meaningful hue and borrows the other
/// endpoint's, so fading to black does not sweep through the rainbow or wash
/// out to grey.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn blend_hsv(a: Rgb, b: Rgb, t: Fraction, direction: HueDirection) -> Rgb {
    let mut start = rgb2hsv(a);
    let mut end = rgb2hsv(b);

    if end.val == 0 || end.sat == 0 {
        end.hue = start.hue;
    }
    if start.val == 0 || start.sat == 0 {
        start.hue = end.hue;
    }
    // Black fades keep saturation too
    if end.val == 0 {
        end.sat = start.sat;
    }
    if start.val == 0 {
        start.sat = end.sat;
    }

    let hue_delta = end.hue.wrapping_sub(start.hue);
    let forward = match direction {
        HueDirection::Forward => true,
        HueDirection::Backward => false,
        HueDirection::Shortest => hue_delta <= 127,
    };

    let distance: i32 = if forward {
        i32::from(hue_delta)
    } else if hue_delta == 0 {
        0
    } else {
        -(256 - i32::from(hue_delta))
    };
    let offset = (distance * t.raw() as i32 + 0x8000) >> 16;
    let hue = (i32::from(start.hue) + offset).rem_euclid(256) as u8;

    hsv2rgb(Hsv {
        hue,
        sat: lerp8(start.sat, end.sat, t),
        val: lerp8(start.val, end.val, t),
    })
}
