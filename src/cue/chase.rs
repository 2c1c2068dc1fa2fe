//! Chase cue
//!
//! A palette wrapped around the ring and rotated over time. The last stop
//! blends back into the first, so a rotation has no visible seam.

use core::num::{NonZeroU8, NonZeroU32};

use heapless::Vec;

use super::{Direction, Effect};
use crate::{
    color::{Blend, Rgb},
    error::{Error, Result},
    fixed::Fraction,
};

/// Maximum number of color stops in a palette
pub const MAX_PALETTE_STOPS: usize = 8;

/// Ordered color stops, between 1 and [`MAX_PALETTE_STOPS`] long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    stops: Vec<Rgb, MAX_PALETTE_STOPS>,
}

impl Palette {
    pub fn new(stops: &[Rgb]) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::InvalidConfiguration("palette needs at least one stop"));
        }
        let stops = Vec::from_slice(stops)
            .map_err(|()| Error::InvalidConfiguration("palette has too many stops"))?;
        Ok(Self { stops })
    }

    /// Palette from a fixed-size array, checked at compile time
    pub fn from_array<const K: usize>(stops: [Rgb; K]) -> Self {
        const { assert!(K >= 1 && K <= MAX_PALETTE_STOPS) };
        let mut palette = Vec::new();
        for stop in stops {
            // Capacity checked above
            let _ = palette.push(stop);
        }
        Self { stops: palette }
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Sample the wrapped palette at `position`
    ///
    /// `position` 0 and 1 both land on the first stop.
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&self, position: Fraction, blend: Blend) -> Rgb {
        let count = self.stops.len();
        let Some(&first) = self.stops.first() else {
            return Rgb::default();
        };
        if count == 1 {
            return first;
        }

        let scaled = u64::from(position.raw()) * count as u64;
        let segment = ((scaled >> 16) as usize) % count;
        let local = Fraction::from_raw((scaled & 0xFFFF) as u32);

        let current = self.stops.get(segment).copied().unwrap_or(first);
        let next = self.stops.get((segment + 1) % count).copied().unwrap_or(first);

        // `local` never reaches one, so a jump blend holds the current stop
        blend.mix(current, next, local)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chase {
    palette: Palette,
    period_ms: NonZeroU32,
    repeats: NonZeroU8,
    direction: Direction,
    blend: Blend,
}

impl Chase {
    /// One palette copy on the ring, rotating forward with RGB blending
    pub const fn new(palette: Palette, period_ms: NonZeroU32) -> Self {
        Self {
            palette,
            period_ms,
            repeats: NonZeroU8::MIN,
            direction: Direction::Forward,
            blend: Blend::Rgb,
        }
    }

    /// How many copies of the palette fit on the ring
    #[must_use]
    pub fn with_repeats(mut self, repeats: NonZeroU8) -> Self {
        self.repeats = repeats;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn period_ms(&self) -> NonZeroU32 {
        self.period_ms
    }

    pub const fn repeats(&self) -> NonZeroU8 {
        self.repeats
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn blend(&self) -> Blend {
        self.blend
    }
}

impl Effect for Chase {
    fn sample(&self, elapsed_ms: u32, channel: u8, channel_count: u8) -> Rgb {
        let position = self.direction.ring_phase(
            elapsed_ms,
            self.period_ms,
            channel,
            channel_count,
            self.repeats.get(),
        );
        self.palette.sample(position.fraction(), self.blend)
    }
}
