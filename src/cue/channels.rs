use super::CHANNELS;

/// Per-channel enable bits of a cue, bit `n` for ring channel `n`
///
/// Only the first [`CHANNELS`] channels are covered. Channels past them, on
/// engines configured with a longer strip, are always enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelMask(u16);

impl ChannelMask {
    /// Every ring channel enabled
    pub const ALL: Self = Self((1 << CHANNELS) - 1);
    /// Every ring channel dark
    pub const NONE: Self = Self(0);

    /// Mask from raw bits, `None` if a bit at or above [`CHANNELS`] is set
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_enabled(self, channel: u8) -> bool {
        channel >= CHANNELS || self.0 & (1 << channel) != 0
    }

    /// Copy with one channel switched, `None` for channels outside the ring
    pub const fn with_channel(self, channel: u8, enabled: bool) -> Option<Self> {
        if channel >= CHANNELS {
            return None;
        }
        let bit = 1 << channel;
        Some(Self(if enabled { self.0 | bit } else { self.0 & !bit }))
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::ALL
    }
}
