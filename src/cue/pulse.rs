//! Pulse cue
//!
//! Oscillates every channel between two colors. The ramp ratio splits each
//! period into a rise towards the second color and a fall back to the first.

use core::num::{NonZeroU32, NonZeroU8};

use super::Effect;
use crate::{
    color::{Blend, Rgb},
    fixed::{Fraction, Phase, ramp},
};

/// Share of the period spent ramping up, as a fraction of 255
///
/// Zero is not allowed: the first color would never be visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampRatio(NonZeroU8);

impl RampRatio {
    /// Ramp up for the whole period, then cut back (sawtooth)
    pub const FULL: Self = Self(NonZeroU8::MAX);
    /// Symmetric triangle
    pub const HALF: Self = match NonZeroU8::new(128) {
        Some(raw) => Self(raw),
        None => Self::FULL,
    };

    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }

    pub const fn fraction(self) -> Fraction {
        Fraction::from_u8(self.0.get())
    }
}

impl Default for RampRatio {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    from: Rgb,
    to: Rgb,
    period_ms: NonZeroU32,
    ramp: RampRatio,
    blend: Blend,
}

impl Pulse {
    /// Linear RGB sawtooth from `from` to `to`
    pub const fn new(from: Rgb, to: Rgb, period_ms: NonZeroU32) -> Self {
        Self {
            from,
            to,
            period_ms,
            ramp: RampRatio::FULL,
            blend: Blend::Rgb,
        }
    }

    #[must_use]
    pub const fn with_ramp(mut self, ramp: RampRatio) -> Self {
        self.ramp = ramp;
        self
    }

    #[must_use]
    pub const fn with_blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    pub const fn start_color(&self) -> Rgb {
        self.from
    }

    pub const fn end_color(&self) -> Rgb {
        self.to
    }

    pub const fn period_ms(&self) -> NonZeroU32 {
        self.period_ms
    }

    pub const fn ramp(&self) -> RampRatio {
        self.ramp
    }

    pub const fn blend(&self) -> Blend {
        self.blend
    }
}

impl Effect for Pulse {
    fn sample(&self, elapsed_ms: u32, _channel: u8, _channel_count: u8) -> Rgb {
        let phase = Phase::of(elapsed_ms, self.period_ms);
        let peak = self.ramp.fraction();

        if self.blend == Blend::Jump {
            return if phase.fraction() < peak {
                self.from
            } else {
                self.to
            };
        }

        self.blend.mix(self.from, self.to, ramp(phase, peak))
    }
}
