//! Solid color cue
//!
//! Fills every channel with one color and ignores time.

use super::Effect;
use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solid {
    color: Rgb,
}

impl Solid {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }
}

impl Effect for Solid {
    fn sample(&self, _elapsed_ms: u32, _channel: u8, _channel_count: u8) -> Rgb {
        self.color
    }
}
