//! Strobe cue
//!
//! Binary flashing gated by `elapsed mod period < on_duration`.

use core::num::NonZeroU32;

use super::Effect;
use crate::{
    color::{BLACK, Rgb},
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strobe {
    on: Rgb,
    off: Rgb,
    period_ms: NonZeroU32,
    on_ms: u32,
}

impl Strobe {
    /// Flash `on` for `on_ms` out of every `period_ms`, black in between
    ///
    /// `on_ms` may not exceed the period.
    pub fn new(on: Rgb, period_ms: NonZeroU32, on_ms: u32) -> Result<Self> {
        if on_ms > period_ms.get() {
            return Err(Error::InvalidConfiguration(
                "strobe on-duration exceeds its period",
            ));
        }
        Ok(Self {
            on,
            off: BLACK,
            period_ms,
            on_ms,
        })
    }

    /// Color shown between flashes
    #[must_use]
    pub const fn with_off_color(mut self, off: Rgb) -> Self {
        self.off = off;
        self
    }

    pub const fn on_color(&self) -> Rgb {
        self.on
    }

    pub const fn off_color(&self) -> Rgb {
        self.off
    }

    pub const fn period_ms(&self) -> NonZeroU32 {
        self.period_ms
    }

    pub const fn on_ms(&self) -> u32 {
        self.on_ms
    }
}

impl Effect for Strobe {
    fn sample(&self, elapsed_ms: u32, _channel: u8, _channel_count: u8) -> Rgb {
        if elapsed_ms % self.period_ms.get() < self.on_ms {
            self.on
        } else {
            self.off
        }
    }
}
