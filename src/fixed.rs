//! Fixed-point helpers shared by the color model and the cue timing laws.
//!
//! Nothing here touches floating point, so the same inputs produce the same
//! bytes on a microcontroller and inside a sandboxed module.

use core::num::NonZeroU32;

const FRACTION_BITS: u32 = 16;

/// Interpolation factor in `[0, 1]` with 16 fractional bits
///
/// Unlike [`Phase`], one is representable, so `lerp(a, b, Fraction::ONE)`
/// lands exactly on `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Fraction(u32);

impl Fraction {
    pub const ZERO: Self = Self(0);
    pub const HALF: Self = Self(1 << (FRACTION_BITS - 1));
    pub const ONE: Self = Self(1 << FRACTION_BITS);

    /// Build from raw 16.16 bits, saturating at one
    pub const fn from_raw(raw: u32) -> Self {
        if raw > Self::ONE.0 {
            Self::ONE
        } else {
            Self(raw)
        }
    }

    /// `num / den`, rounded down and saturated to `[0, 1]`
    ///
    /// A zero denominator yields zero.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_ratio(num: u32, den: u32) -> Self {
        if den == 0 {
            return Self::ZERO;
        }
        if num >= den {
            return Self::ONE;
        }
        Self((((num as u64) << FRACTION_BITS) / den as u64) as u32)
    }

    /// Map an 8-bit level (255 = one) onto a fraction
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u8(level: u8) -> Self {
        Self((((level as u32) << FRACTION_BITS) + 127) / 255)
    }

    /// Raw 16.16 bits
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// `1 - self`
    pub const fn complement(self) -> Self {
        Self(Self::ONE.0 - self.0)
    }
}

/// Position on a cycle, `[0, 1)` stored in 16 bits
///
/// Addition wraps, which is exactly "mod 1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Phase(u16);

impl Phase {
    pub const ZERO: Self = Self(0);

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Position of `elapsed_ms` within a period
    #[allow(clippy::cast_possible_truncation)]
    pub const fn of(elapsed_ms: u32, period_ms: NonZeroU32) -> Self {
        let period = period_ms.get() as u64;
        let within = elapsed_ms as u64 % period;
        Self(((within << FRACTION_BITS) / period) as u16)
    }

    /// Spatial offset of a channel on a ring of `count` channels
    ///
    /// `repeats` copies of a pattern fit on the ring. `count` must be non-zero;
    /// callers validate it before sampling.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn of_channel(channel: u8, count: u8, repeats: u8) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        let count = count as u32;
        let slot = (channel as u32 * repeats as u32) % count;
        Self(((slot << FRACTION_BITS) / count) as u16)
    }

    #[must_use]
    pub const fn wrapping_add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }

    /// The phase as an interpolation factor
    pub const fn fraction(self) -> Fraction {
        Fraction(self.0 as u32)
    }

    /// Top 8 bits, used as an 8-bit hue
    #[allow(clippy::cast_possible_truncation)]
    pub const fn as_u8(self) -> u8 {
        (self.0 >> 8) as u8
    }
}

/// Interpolate two 8-bit values, rounding half up
///
/// `a + floor((b - a) * t + 1/2)`
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub const fn lerp8(a: u8, b: u8, t: Fraction) -> u8 {
    let delta = b as i32 - a as i32;
    let scaled = (delta * t.0 as i32 + (1 << (FRACTION_BITS - 1))) >> FRACTION_BITS;
    (a as i32 + scaled) as u8
}

/// Triangle ramp over one cycle
///
/// Rises from zero to one while `phase <= peak`, then falls back to zero.
/// With `peak == ONE` this is the identity sawtooth.
#[allow(clippy::cast_possible_truncation)]
pub const fn ramp(phase: Phase, peak: Fraction) -> Fraction {
    let p = phase.0 as u64;
    let peak = peak.0 as u64;
    if peak == 0 {
        return Fraction::ZERO;
    }
    if p <= peak {
        Fraction::from_raw(((p << FRACTION_BITS) / peak) as u32)
    } else {
        let fall = ((p - peak) << FRACTION_BITS) / (Fraction::ONE.0 as u64 - peak);
        Fraction::from_raw(Fraction::ONE.0 - fall as u32)
    }
}
