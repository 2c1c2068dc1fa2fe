//! Rainbow cue
//!
//! Spreads the hue circle around the ring and rotates it over time. Hue is
//! taken straight from the ring phase, so there are no palette stops to blend.

use core::num::{NonZeroU8, NonZeroU32};

use super::{Direction, Effect};
use crate::color::{Rgb, from_hsv};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rainbow {
    period_ms: NonZeroU32,
    saturation: u8,
    value: u8,
    repeats: NonZeroU8,
    direction: Direction,
}

impl Rainbow {
    /// Fully saturated, full brightness, one hue circle on the ring
    pub const fn new(period_ms: NonZeroU32) -> Self {
        Self {
            period_ms,
            saturation: 255,
            value: 255,
            repeats: NonZeroU8::MIN,
            direction: Direction::Forward,
        }
    }

    /// Set the saturation
    #[must_use]
    pub const fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the brightness value
    #[must_use]
    pub const fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    /// How many hue circles fit on the ring
    #[must_use]
    pub const fn with_repeats(mut self, repeats: NonZeroU8) -> Self {
        self.repeats = repeats;
        self
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub const fn period_ms(&self) -> NonZeroU32 {
        self.period_ms
    }

    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub const fn repeats(&self) -> NonZeroU8 {
        self.repeats
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl Effect for Rainbow {
    fn sample(&self, elapsed_ms: u32, channel: u8, channel_count: u8) -> Rgb {
        let phase = self.direction.ring_phase(
            elapsed_ms,
            self.period_ms,
            channel,
            channel_count,
            self.repeats.get(),
        );
        from_hsv(phase.as_u8(), self.saturation, self.value)
    }
}
