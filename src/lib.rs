#![no_std]

pub mod codec;
pub mod color;
pub mod command;
pub mod cue;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod frame_scheduler;
pub mod host;
pub mod playback;
pub mod registry;

pub use codec::{EncodedCue, FORMAT_VERSION, decode, encode, encode_into};
pub use command::{Command, CommandProcessor, CommandQueue, CommandReport};
pub use cue::{CHANNELS, ChannelMask, Cue, CueKind, CueKindId, Direction, DurationPolicy};
pub use engine::{DEFAULT_CUE_CAPACITY, Engine, EngineConfig};
pub use error::{DecodeError, EncodeError, Error, Result};
pub use fixed::{Fraction, Phase};
pub use frame_scheduler::FrameScheduler;
pub use playback::{Playback, PlaybackState};
pub use registry::CueRegistry;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
