//! Cue system with a closed set of effect variants
//!
//! Every variant is a plain value stored inline in [`CueKind`], so cues can be
//! copied into fixed-capacity registries without heap allocations. Each
//! variant implements the [`Effect`] trait: a pure timing law mapping
//! `(elapsed, channel)` to a color.

mod channels;
mod chase;
mod pulse;
mod rainbow;
mod solid;
mod strobe;

use core::num::NonZeroU32;

pub use channels::ChannelMask;
pub use chase::{Chase, MAX_PALETTE_STOPS, Palette};
pub use pulse::{Pulse, RampRatio};
pub use rainbow::Rainbow;
pub use solid::Solid;
pub use strobe::Strobe;

use crate::{
    color::{BLACK, Blend, HueDirection, Rgb, WHITE},
    error::{Error, Result},
    fixed::Phase,
};

/// Number of RGB channels on the Iris ring
pub const CHANNELS: u8 = 12;

const CUE_NAME_SOLID: &str = "solid";
const CUE_NAME_PULSE: &str = "pulse";
const CUE_NAME_CHASE: &str = "chase";
const CUE_NAME_RAINBOW: &str = "rainbow";
const CUE_NAME_STROBE: &str = "strobe";

const PRESET_ROTATION_PERIOD: NonZeroU32 = NonZeroU32::new(3000).unwrap();
const PRESET_BREATHING_PERIOD: NonZeroU32 = NonZeroU32::new(3600).unwrap();
// Ramps up for 40% of the breath
const PRESET_BREATHING_RAMP: RampRatio = RampRatio::new(102).unwrap();

const CUE_ID_SOLID: u8 = 0;
const CUE_ID_PULSE: u8 = 1;
const CUE_ID_CHASE: u8 = 2;
const CUE_ID_RAINBOW: u8 = 3;
const CUE_ID_STROBE: u8 = 4;

pub trait Effect {
    /// Color of one channel `elapsed_ms` after launch
    ///
    /// `channel < channel_count` and `channel_count > 0` are checked by
    /// [`Cue::evaluate`] before this is called.
    fn sample(&self, elapsed_ms: u32, channel: u8, channel_count: u8) -> Rgb;
}

/// Travel direction of patterns around the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Pattern travels towards higher channel indices
    #[default]
    Forward,
    /// Pattern travels towards lower channel indices
    Reverse,
}

impl Direction {
    /// Sample point of `channel` on a ring pattern with the given period
    pub(crate) fn ring_phase(
        self,
        elapsed_ms: u32,
        period_ms: NonZeroU32,
        channel: u8,
        channel_count: u8,
        repeats: u8,
    ) -> Phase {
        // Time advances the phase, so the offset has to shrink with the index
        // for the pattern to move up the ring
        let channel = match self {
            Self::Forward => channel_count - 1 - channel,
            Self::Reverse => channel,
        };
        Phase::of(elapsed_ms, period_ms)
            .wrapping_add(Phase::of_channel(channel, channel_count, repeats))
    }
}

/// How long a launched cue stays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationPolicy {
    /// Plays until another cue replaces it
    #[default]
    Indefinite,
    /// Plays for a fixed number of milliseconds, then the fixture goes idle
    Fixed(NonZeroU32),
}

impl DurationPolicy {
    /// Fixed duration; zero is rejected
    pub fn fixed(duration_ms: u32) -> Result<Self> {
        NonZeroU32::new(duration_ms)
            .map(Self::Fixed)
            .ok_or(Error::InvalidConfiguration("fixed duration must be non-zero"))
    }

    /// Has a cue with this policy run out after `elapsed_ms`
    pub const fn is_finished(self, elapsed_ms: u32) -> bool {
        match self {
            Self::Indefinite => false,
            Self::Fixed(duration) => elapsed_ms >= duration.get(),
        }
    }
}

/// Cue kind - enum containing all possible effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueKind {
    /// One color on every channel
    Solid(Solid),
    /// Two colors oscillating over time
    Pulse(Pulse),
    /// Palette rotating around the ring
    Chase(Chase),
    /// Hue wheel rotating around the ring
    Rainbow(Rainbow),
    /// Hard on/off flashing
    Strobe(Strobe),
}

/// Known cue kind ids, also used as wire tags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CueKindId {
    Solid = CUE_ID_SOLID,
    Pulse = CUE_ID_PULSE,
    Chase = CUE_ID_CHASE,
    Rainbow = CUE_ID_RAINBOW,
    Strobe = CUE_ID_STROBE,
}

impl CueKindId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            CUE_ID_SOLID => Self::Solid,
            CUE_ID_PULSE => Self::Pulse,
            CUE_ID_CHASE => Self::Chase,
            CUE_ID_RAINBOW => Self::Rainbow,
            CUE_ID_STROBE => Self::Strobe,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => CUE_NAME_SOLID,
            Self::Pulse => CUE_NAME_PULSE,
            Self::Chase => CUE_NAME_CHASE,
            Self::Rainbow => CUE_NAME_RAINBOW,
            Self::Strobe => CUE_NAME_STROBE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            CUE_NAME_SOLID => Some(Self::Solid),
            CUE_NAME_PULSE => Some(Self::Pulse),
            CUE_NAME_CHASE => Some(Self::Chase),
            CUE_NAME_RAINBOW => Some(Self::Rainbow),
            CUE_NAME_STROBE => Some(Self::Strobe),
            _ => None,
        }
    }
}

impl CueKind {
    /// Get the kind ID for external observation
    pub const fn id(&self) -> CueKindId {
        match self {
            Self::Solid(_) => CueKindId::Solid,
            Self::Pulse(_) => CueKindId::Pulse,
            Self::Chase(_) => CueKindId::Chase,
            Self::Rainbow(_) => CueKindId::Rainbow,
            Self::Strobe(_) => CueKindId::Strobe,
        }
    }

    fn sample(&self, elapsed_ms: u32, channel: u8, channel_count: u8) -> Rgb {
        match self {
            Self::Solid(effect) => effect.sample(elapsed_ms, channel, channel_count),
            Self::Pulse(effect) => effect.sample(elapsed_ms, channel, channel_count),
            Self::Chase(effect) => effect.sample(elapsed_ms, channel, channel_count),
            Self::Rainbow(effect) => effect.sample(elapsed_ms, channel, channel_count),
            Self::Strobe(effect) => effect.sample(elapsed_ms, channel, channel_count),
        }
    }
}

/// A self-contained lighting effect plus its timing policy
///
/// The parameters fully determine the output: evaluation reads nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    kind: CueKind,
    duration: DurationPolicy,
    channels: ChannelMask,
}

impl Default for Cue {
    fn default() -> Self {
        Self::blackout()
    }
}

impl From<CueKind> for Cue {
    fn from(kind: CueKind) -> Self {
        Self::new(kind)
    }
}

impl Cue {
    /// Indefinite cue of the given kind
    pub const fn new(kind: CueKind) -> Self {
        Self {
            kind,
            duration: DurationPolicy::Indefinite,
            channels: ChannelMask::ALL,
        }
    }

    /// Set the duration policy
    #[must_use]
    pub fn with_duration(mut self, duration: DurationPolicy) -> Self {
        self.duration = duration;
        self
    }

    /// Restrict the cue to the enabled channels
    #[must_use]
    pub fn with_channel_mask(mut self, channels: ChannelMask) -> Self {
        self.channels = channels;
        self
    }

    /// Enable or disable one ring channel
    pub fn with_channel(mut self, channel: u8, enabled: bool) -> Result<Self> {
        self.channels = self
            .channels
            .with_channel(channel, enabled)
            .ok_or(Error::InvalidChannel {
                channel,
                channel_count: CHANNELS,
            })?;
        Ok(self)
    }

    pub const fn kind(&self) -> &CueKind {
        &self.kind
    }

    pub const fn duration(&self) -> DurationPolicy {
        self.duration
    }

    pub const fn channel_mask(&self) -> ChannelMask {
        self.channels
    }

    pub const fn is_channel_enabled(&self, channel: u8) -> bool {
        self.channels.is_enabled(channel)
    }

    /// All channels in one color
    pub const fn solid(color: Rgb) -> Self {
        Self::new(CueKind::Solid(Solid::new(color)))
    }

    /// All channels off. Also used to fill removed registry slots.
    pub const fn blackout() -> Self {
        Self::solid(BLACK)
    }

    /// Sawtooth pulse from `from` to `to`
    pub fn pulse(from: Rgb, to: Rgb, period_ms: u32) -> Result<Self> {
        let period = non_zero_period(period_ms)?;
        Ok(Self::new(CueKind::Pulse(Pulse::new(from, to, period))))
    }

    /// Palette rotating once around the ring per period
    pub fn chase(stops: &[Rgb], period_ms: u32) -> Result<Self> {
        let period = non_zero_period(period_ms)?;
        let palette = Palette::new(stops)?;
        Ok(Self::new(CueKind::Chase(Chase::new(palette, period))))
    }

    /// Full hue wheel rotating once around the ring per period
    pub fn rainbow_with_period(period_ms: u32) -> Result<Self> {
        let period = non_zero_period(period_ms)?;
        Ok(Self::new(CueKind::Rainbow(Rainbow::new(period))))
    }

    /// `on` for the first `on_ms` of every period, black otherwise
    pub fn strobe(on: Rgb, period_ms: u32, on_ms: u32) -> Result<Self> {
        let period = non_zero_period(period_ms)?;
        Ok(Self::new(CueKind::Strobe(Strobe::new(on, period, on_ms)?)))
    }

    /// Rainbow rotating towards higher channel indices
    pub fn rainbow() -> Self {
        Self::new(CueKind::Rainbow(Rainbow::new(PRESET_ROTATION_PERIOD)))
    }

    /// Black and white halves rotating towards higher channel indices
    pub fn black_white_jump() -> Self {
        let palette = Palette::from_array([WHITE, BLACK]);
        let chase = Chase::new(palette, PRESET_ROTATION_PERIOD).with_blend(Blend::Jump);
        Self::new(CueKind::Chase(chase))
    }

    /// White breathing on every channel at once
    pub fn white_breathing() -> Self {
        let pulse =
            Pulse::new(BLACK, WHITE, PRESET_BREATHING_PERIOD).with_ramp(PRESET_BREATHING_RAMP);
        Self::new(CueKind::Pulse(pulse))
    }

    /// Hue-space pulse between two colors taking the short way round
    pub fn hue_pulse(from: Rgb, to: Rgb, period_ms: u32) -> Result<Self> {
        let period = non_zero_period(period_ms)?;
        let pulse = Pulse::new(from, to, period)
            .with_blend(Blend::Hsv(HueDirection::Shortest))
            .with_ramp(RampRatio::HALF);
        Ok(Self::new(CueKind::Pulse(pulse)))
    }

    /// Calculate the color of one channel `elapsed_ms` after launch
    ///
    /// Channels disabled in the mask are black.
    pub fn evaluate(&self, elapsed_ms: u32, channel: u8, channel_count: u8) -> Result<Rgb> {
        if channel_count == 0 {
            return Err(Error::InvalidConfiguration("channel count must be non-zero"));
        }
        if channel >= channel_count {
            return Err(Error::InvalidChannel {
                channel,
                channel_count,
            });
        }
        if !self.channels.is_enabled(channel) {
            return Ok(BLACK);
        }
        Ok(self.kind.sample(elapsed_ms, channel, channel_count))
    }

    /// Has a fixed-duration cue run out after `elapsed_ms`
    pub const fn is_finished(&self, elapsed_ms: u32) -> bool {
        self.duration.is_finished(elapsed_ms)
    }
}

fn non_zero_period(period_ms: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(period_ms).ok_or(Error::InvalidConfiguration("period must be non-zero"))
}
