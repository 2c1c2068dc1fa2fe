mod gradient;
mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use gradient::{Blend, HueDirection, blend_hsv};
pub use utils::{HexString, from_hsv, hsv2rgb, lerp, parse_hex, rgb_from_u32, rgb2hsv, to_hex};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
