#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::codec;
use crate::color::{BLACK, Rgb};
use crate::cue::{CHANNELS, Cue};
use crate::error::{Error, Result};
use crate::playback::{Playback, PlaybackState};
use crate::registry::CueRegistry;

/// Default number of cues an engine can hold
pub const DEFAULT_CUE_CAPACITY: usize = 16;

/// Configuration for the cue engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of channels on the fixture ring
    pub channel_count: u8,
    /// Color shown while nothing is playing
    pub idle_color: Rgb,
}

impl EngineConfig {
    /// 12-channel Iris ring, dark while idle
    pub const DEFAULT: Self = Self {
        channel_count: CHANNELS,
        idle_color: BLACK,
    };
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Cue Engine - registry, playback and evaluator in one value
///
/// Mutations (`add_cue`, `launch_cue`, ...) and evaluation take turns on the
/// same thread of control; evaluation only reads.
#[derive(Debug, Clone)]
pub struct Engine<const CUES: usize = DEFAULT_CUE_CAPACITY> {
    config: EngineConfig,
    registry: CueRegistry<CUES>,
    playback: Playback,
}

impl<const CUES: usize> Default for Engine<CUES> {
    fn default() -> Self {
        Self::new(EngineConfig::DEFAULT)
    }
}

impl<const CUES: usize> Engine<CUES> {
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: CueRegistry::new(),
            playback: Playback::new(),
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn channel_count(&self) -> u8 {
        self.config.channel_count
    }

    pub const fn registry(&self) -> &CueRegistry<CUES> {
        &self.registry
    }

    pub const fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Append a cue, returning its index
    pub fn add_cue(&mut self, cue: Cue) -> Result<usize> {
        self.registry.add(cue)
    }

    /// Decode a wire payload and append it
    ///
    /// The registry is only touched once the payload decoded cleanly.
    pub fn add_encoded_cue(&mut self, bytes: &[u8]) -> Result<usize> {
        let cue = codec::decode(bytes).inspect_err(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[engine] rejected cue payload: {}", _err);
        })?;
        self.registry.add(cue)
    }

    /// Overwrite the cue at `index`
    ///
    /// If that cue is playing, the new parameters apply from the next
    /// evaluation on, without restarting its clock.
    pub fn replace_cue(&mut self, index: usize, cue: Cue) -> Result<Cue> {
        self.registry.replace(index, cue)
    }

    /// Blank the cue at `index`, keeping every index stable
    pub fn remove_cue(&mut self, index: usize) -> Result<Cue> {
        self.registry.remove(index)
    }

    /// Enable or disable one ring channel of the cue at `index`
    ///
    /// Applies to a playing cue from the next evaluation on.
    pub fn set_cue_channel(&mut self, index: usize, channel: u8, enabled: bool) -> Result<()> {
        let cue = self.registry.get(index)?.clone().with_channel(channel, enabled)?;
        self.registry.replace(index, cue)?;
        Ok(())
    }

    /// Start the cue at `index` at time `now_ms`
    pub fn launch_cue(&mut self, index: usize, now_ms: u32) -> Result<()> {
        self.playback.launch(&self.registry, index, now_ms)
    }

    /// Return to idle
    pub fn stop(&mut self) {
        self.playback.stop();
    }

    pub const fn current_cue_index(&self) -> Option<usize> {
        self.playback.current_index()
    }

    /// Color of `channel` at `now_ms`, with typed errors
    ///
    /// Idle playback and finished fixed-duration cues yield the idle color.
    /// So do channels the playing cue masks off.
    pub fn try_current_color(&self, now_ms: u32, channel: u8) -> Result<Rgb> {
        let channel_count = self.config.channel_count;
        if channel_count == 0 {
            return Err(Error::InvalidConfiguration("channel count must be non-zero"));
        }
        if channel >= channel_count {
            return Err(Error::InvalidChannel {
                channel,
                channel_count,
            });
        }

        let Some(active) = self.playback.current(now_ms) else {
            return Ok(self.config.idle_color);
        };
        let cue = self.registry.get(active.index)?;
        if cue.is_finished(active.elapsed_ms) || !cue.is_channel_enabled(channel) {
            return Ok(self.config.idle_color);
        }
        cue.evaluate(active.elapsed_ms, channel, channel_count)
    }

    /// Color of `channel` at `now_ms`
    ///
    /// Total: any error collapses to the idle color, so a display loop can
    /// poll this every tick without error handling.
    pub fn current_color(&self, now_ms: u32, channel: u8) -> Rgb {
        self.try_current_color(now_ms, channel)
            .unwrap_or(self.config.idle_color)
    }

    /// Fill a frame with the colors of the first channels at `now_ms`
    ///
    /// Writes `min(frame.len(), channel_count)` entries and returns that
    /// prefix.
    pub fn render<'f>(&self, now_ms: u32, frame: &'f mut [Rgb]) -> &'f mut [Rgb] {
        let count = frame.len().min(usize::from(self.config.channel_count));
        let frame = &mut frame[..count];
        for (channel, led) in (0..=u8::MAX).zip(frame.iter_mut()) {
            *led = self.current_color(now_ms, channel);
        }
        frame
    }
}
