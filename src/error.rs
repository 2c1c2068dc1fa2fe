//! Error taxonomy shared by the engine, the registry and the codec.

use thiserror::Error;

/// Convenience result type used across the engine.
pub type Result<T> = core::result::Result<T, Error>;

/// Engine errors
///
/// Every fallible engine operation reports one of these instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Channel index is not below the fixture's channel count
    #[error("channel {channel} is out of range for {channel_count} channels")]
    InvalidChannel { channel: u8, channel_count: u8 },

    /// A parameter combination that can never be evaluated
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// No cue is stored at the requested registry index
    #[error("cue index {index} is out of range (registry holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The fixed-capacity registry cannot take another cue
    #[error("cue registry is full (capacity {capacity})")]
    RegistryFull { capacity: usize },

    /// Wire payload was rejected
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Reasons a wire payload is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Format version byte is not understood by this build
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    /// Buffer ended before the frame was complete
    #[error("buffer is truncated")]
    Truncated,

    /// A tag byte names no known variant
    #[error("unknown {field} tag {value}")]
    UnknownTag { field: &'static str, value: u8 },

    /// A field decoded fine but its value is not allowed
    #[error("parameter out of range: {0}")]
    ParameterOutOfRange(&'static str),

    /// Extra bytes follow a complete frame
    #[error("trailing bytes after frame")]
    TrailingBytes,

    /// Registry frame holds more cues than the target registry can store
    #[error("registry frame exceeds capacity {capacity}")]
    TooManyCues { capacity: usize },
}

/// Encoding into a caller-provided buffer failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// The registry frame count byte cannot represent this many cues
    #[error("{count} cues do not fit in one registry frame")]
    TooManyCues { count: usize },
}
