//! Single-slot cue playback state machine
//!
//! `Idle` until a cue is launched, then `Playing` with the launch timestamp.
//! A new launch always preempts the current cue; nothing is cross-faded here.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::Result;
use crate::registry::CueRegistry;

/// Milliseconds from `launched_at` to `now` on a clock that wraps at 2^32
///
/// The smaller of the two distances around the ring, so a reading taken after
/// the counter wrapped yields the true small value and a reading slightly
/// behind the launch timestamp yields a small value too.
#[inline]
pub const fn elapsed_ms(launched_at: u32, now: u32) -> u32 {
    let forward = now.wrapping_sub(launched_at);
    let backward = launched_at.wrapping_sub(now);
    if forward <= backward { forward } else { backward }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing launched yet, or stopped
    #[default]
    Idle,
    /// Cue at `index` launched at `launched_at` (ms, wrapping clock)
    Playing { index: usize, launched_at: u32 },
}

/// The cue currently on the fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCue {
    pub index: usize,
    pub elapsed_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Playback {
    state: PlaybackState,
}

impl Playback {
    pub const fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
        }
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Launch the cue at `index`, preempting whatever is playing
    ///
    /// The index is checked against the registry; on error the state is left
    /// untouched.
    pub fn launch<const N: usize>(
        &mut self,
        registry: &CueRegistry<N>,
        index: usize,
        now: u32,
    ) -> Result<()> {
        registry.get(index)?;
        self.state = PlaybackState::Playing {
            index,
            launched_at: now,
        };
        #[cfg(feature = "esp32-log")]
        println!("[playback] launched cue {} at {}ms", index, now);
        Ok(())
    }

    /// Back to idle
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Index of the playing cue
    pub const fn current_index(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing { index, .. } => Some(index),
        }
    }

    /// Playing cue and its elapsed time at `now`
    pub const fn current(&self, now: u32) -> Option<ActiveCue> {
        match self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing { index, launched_at } => Some(ActiveCue {
                index,
                elapsed_ms: elapsed_ms(launched_at, now),
            }),
        }
    }
}
