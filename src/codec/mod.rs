//! Versioned binary wire format for cues and cue registries
//!
//! A cue frame is a version byte, a kind tag and the kind's fixed fields,
//! followed by a duration and the channel mask. Integers are little-endian,
//! colors are `r g b`.
//!
//! ```text
//! cue      := version:u8 kind:u8 fields duration channels
//! duration := 0x00 0:u32 | 0x01 ms:u32(non-zero)
//! channels := mask:u16(bit n = channel n, bits >= 12 clear)
//! blend    := 0x00 0x00 (jump) | 0x01 0x00 (rgb) | 0x02 hue_direction:u8
//!
//! solid    := color:rgb
//! pulse    := start:rgb end:rgb period:u32 ramp:u8(non-zero) blend
//! chase    := period:u32 repeats:u8(non-zero) direction:u8 blend
//!             count:u8(1..=8) stop:rgb * count
//! rainbow  := period:u32 repeats:u8(non-zero) direction:u8 saturation:u8 value:u8
//! strobe   := on:rgb off:rgb period:u32 on_ms:u32(<= period)
//!
//! registry := version:u8 count:u8 (len:u8 cue) * count
//! ```
//!
//! Decoding never trusts a length or tag beyond its validated bounds and
//! rejects out-of-range values instead of clamping them.

mod wire;

use core::num::{NonZeroU8, NonZeroU32};

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::color::{BLACK, Blend, HueDirection};
use crate::cue::{
    ChannelMask, Chase, Cue, CueKind, CueKindId, Direction, DurationPolicy, MAX_PALETTE_STOPS,
    Palette, Pulse, Rainbow, RampRatio, Solid, Strobe,
};
use crate::error::{DecodeError, EncodeError};
use crate::registry::CueRegistry;
use wire::{Reader, Writer};

/// Current wire format version
pub const FORMAT_VERSION: u8 = 1;

/// Largest possible cue frame (a chase with a full palette)
pub const MAX_CUE_LEN: usize = 2 + 9 + 3 * MAX_PALETTE_STOPS + 5 + 2;

/// Encoded cue frame
pub type EncodedCue = Vec<u8, MAX_CUE_LEN>;

const DURATION_INDEFINITE: u8 = 0;
const DURATION_FIXED: u8 = 1;

const BLEND_JUMP: u8 = 0;
const BLEND_RGB: u8 = 1;
const BLEND_HSV: u8 = 2;

const HUE_FORWARD: u8 = 0;
const HUE_BACKWARD: u8 = 1;
const HUE_SHORTEST: u8 = 2;

const DIRECTION_FORWARD: u8 = 0;
const DIRECTION_REVERSE: u8 = 1;

/// Upper bound of a registry frame holding `capacity` cues
pub const fn max_registry_len(capacity: usize) -> usize {
    2 + capacity * (1 + MAX_CUE_LEN)
}

/// Encode a cue into a fixed-capacity buffer
pub fn encode(cue: &Cue) -> EncodedCue {
    let mut buf = [0; MAX_CUE_LEN];
    // MAX_CUE_LEN covers every variant, so this cannot run out of space
    let len = encode_into(cue, &mut buf).unwrap_or(0);
    Vec::from_slice(&buf[..len]).unwrap_or_default()
}

/// Encode a cue into `buf`, returning the number of bytes written
pub fn encode_into(cue: &Cue, buf: &mut [u8]) -> Result<usize, EncodeError> {
    let mut out = Writer::new(buf);
    write_cue(&mut out, cue)?;
    Ok(out.len())
}

/// Decode one cue frame
///
/// The whole buffer must be exactly one frame.
pub fn decode(bytes: &[u8]) -> Result<Cue, DecodeError> {
    let mut input = Reader::new(bytes);
    let cue = read_cue(&mut input)?;
    input.finish()?;
    Ok(cue)
}

/// Encode every cue of a registry into `buf`
pub fn encode_registry_into<const N: usize>(
    registry: &CueRegistry<N>,
    buf: &mut [u8],
) -> Result<usize, EncodeError> {
    let count = u8::try_from(registry.len()).map_err(|_| EncodeError::TooManyCues {
        count: registry.len(),
    })?;

    let mut out = Writer::new(buf);
    out.u8(FORMAT_VERSION)?;
    out.u8(count)?;
    for cue in registry {
        let len_at = out.placeholder()?;
        let start = out.len();
        write_cue(&mut out, cue)?;
        // A cue frame is at most MAX_CUE_LEN bytes, well below 256
        #[allow(clippy::cast_possible_truncation)]
        let len = (out.len() - start) as u8;
        out.patch(len_at, len);
    }
    Ok(out.len())
}

/// Decode a registry frame into a registry of capacity `N`
pub fn decode_registry<const N: usize>(bytes: &[u8]) -> Result<CueRegistry<N>, DecodeError> {
    let mut input = Reader::new(bytes);
    read_version(&mut input)?;

    let count = usize::from(input.u8()?);
    if count > N {
        return Err(DecodeError::TooManyCues { capacity: N });
    }

    let mut registry = CueRegistry::new();
    for _ in 0..count {
        let len = usize::from(input.u8()?);
        let cue = decode(input.take(len)?)?;
        registry
            .add(cue)
            .map_err(|_| DecodeError::TooManyCues { capacity: N })?;
    }
    input.finish()?;
    Ok(registry)
}

fn write_cue(out: &mut Writer<'_>, cue: &Cue) -> Result<(), EncodeError> {
    out.u8(FORMAT_VERSION)?;
    out.u8(cue.kind().id() as u8)?;

    match cue.kind() {
        CueKind::Solid(solid) => out.rgb(solid.color())?,
        CueKind::Pulse(pulse) => {
            out.rgb(pulse.start_color())?;
            out.rgb(pulse.end_color())?;
            out.u32(pulse.period_ms().get())?;
            out.u8(pulse.ramp().get())?;
            write_blend(out, pulse.blend())?;
        }
        CueKind::Chase(chase) => {
            out.u32(chase.period_ms().get())?;
            out.u8(chase.repeats().get())?;
            write_direction(out, chase.direction())?;
            write_blend(out, chase.blend())?;
            let stops = chase.palette().stops();
            // Palettes hold at most MAX_PALETTE_STOPS entries
            #[allow(clippy::cast_possible_truncation)]
            let count = stops.len() as u8;
            out.u8(count)?;
            for &stop in stops {
                out.rgb(stop)?;
            }
        }
        CueKind::Rainbow(rainbow) => {
            out.u32(rainbow.period_ms().get())?;
            out.u8(rainbow.repeats().get())?;
            write_direction(out, rainbow.direction())?;
            out.u8(rainbow.saturation())?;
            out.u8(rainbow.value())?;
        }
        CueKind::Strobe(strobe) => {
            out.rgb(strobe.on_color())?;
            out.rgb(strobe.off_color())?;
            out.u32(strobe.period_ms().get())?;
            out.u32(strobe.on_ms())?;
        }
    }

    match cue.duration() {
        DurationPolicy::Indefinite => {
            out.u8(DURATION_INDEFINITE)?;
            out.u32(0)?;
        }
        DurationPolicy::Fixed(duration) => {
            out.u8(DURATION_FIXED)?;
            out.u32(duration.get())?;
        }
    }
    out.u16(cue.channel_mask().bits())
}

fn write_blend(out: &mut Writer<'_>, blend: Blend) -> Result<(), EncodeError> {
    let (mode, hue) = match blend {
        Blend::Jump => (BLEND_JUMP, 0),
        Blend::Rgb => (BLEND_RGB, 0),
        Blend::Hsv(HueDirection::Forward) => (BLEND_HSV, HUE_FORWARD),
        Blend::Hsv(HueDirection::Backward) => (BLEND_HSV, HUE_BACKWARD),
        Blend::Hsv(HueDirection::Shortest) => (BLEND_HSV, HUE_SHORTEST),
    };
    out.u8(mode)?;
    out.u8(hue)
}

fn write_direction(out: &mut Writer<'_>, direction: Direction) -> Result<(), EncodeError> {
    out.u8(match direction {
        Direction::Forward => DIRECTION_FORWARD,
        Direction::Reverse => DIRECTION_REVERSE,
    })
}

fn read_version(input: &mut Reader<'_>) -> Result<(), DecodeError> {
    let version = input.u8()?;
    if version != FORMAT_VERSION {
        #[cfg(feature = "esp32-log")]
        println!("[codec] unsupported format version {}", version);
        return Err(DecodeError::UnsupportedVersion(version));
    }
    Ok(())
}

fn read_cue(input: &mut Reader<'_>) -> Result<Cue, DecodeError> {
    read_version(input)?;

    let tag = input.u8()?;
    let id = CueKindId::from_raw(tag).ok_or(DecodeError::UnknownTag {
        field: "cue kind",
        value: tag,
    })?;

    let kind = match id {
        CueKindId::Solid => CueKind::Solid(Solid::new(input.rgb()?)),
        CueKindId::Pulse => {
            let start = input.rgb()?;
            let end = input.rgb()?;
            let period = read_period(input)?;
            let ramp = RampRatio::new(input.u8()?)
                .ok_or(DecodeError::ParameterOutOfRange("pulse ramp ratio"))?;
            let blend = read_blend(input)?;
            CueKind::Pulse(Pulse::new(start, end, period).with_ramp(ramp).with_blend(blend))
        }
        CueKindId::Chase => {
            let period = read_period(input)?;
            let repeats = read_repeats(input)?;
            let direction = read_direction(input)?;
            let blend = read_blend(input)?;
            let count = usize::from(input.u8()?);
            if count == 0 || count > MAX_PALETTE_STOPS {
                return Err(DecodeError::ParameterOutOfRange("palette stop count"));
            }
            let mut stops = [BLACK; MAX_PALETTE_STOPS];
            for stop in stops.iter_mut().take(count) {
                *stop = input.rgb()?;
            }
            let palette = Palette::new(&stops[..count])
                .map_err(|_| DecodeError::ParameterOutOfRange("palette stop count"))?;
            CueKind::Chase(
                Chase::new(palette, period)
                    .with_repeats(repeats)
                    .with_direction(direction)
                    .with_blend(blend),
            )
        }
        CueKindId::Rainbow => {
            let period = read_period(input)?;
            let repeats = read_repeats(input)?;
            let direction = read_direction(input)?;
            let saturation = input.u8()?;
            let value = input.u8()?;
            CueKind::Rainbow(
                Rainbow::new(period)
                    .with_repeats(repeats)
                    .with_direction(direction)
                    .with_saturation(saturation)
                    .with_value(value),
            )
        }
        CueKindId::Strobe => {
            let on = input.rgb()?;
            let off = input.rgb()?;
            let period = read_period(input)?;
            let on_ms = input.u32()?;
            let strobe = Strobe::new(on, period, on_ms)
                .map_err(|_| DecodeError::ParameterOutOfRange("strobe on-duration"))?;
            CueKind::Strobe(strobe.with_off_color(off))
        }
    };

    let duration = read_duration(input)?;
    let channels = ChannelMask::from_bits(input.u16()?)
        .ok_or(DecodeError::ParameterOutOfRange("channel mask"))?;
    Ok(Cue::new(kind)
        .with_duration(duration)
        .with_channel_mask(channels))
}

fn read_period(input: &mut Reader<'_>) -> Result<NonZeroU32, DecodeError> {
    NonZeroU32::new(input.u32()?).ok_or(DecodeError::ParameterOutOfRange("period"))
}

fn read_repeats(input: &mut Reader<'_>) -> Result<NonZeroU8, DecodeError> {
    NonZeroU8::new(input.u8()?).ok_or(DecodeError::ParameterOutOfRange("repeats"))
}

fn read_direction(input: &mut Reader<'_>) -> Result<Direction, DecodeError> {
    match input.u8()? {
        DIRECTION_FORWARD => Ok(Direction::Forward),
        DIRECTION_REVERSE => Ok(Direction::Reverse),
        value => Err(DecodeError::UnknownTag {
            field: "direction",
            value,
        }),
    }
}

fn read_blend(input: &mut Reader<'_>) -> Result<Blend, DecodeError> {
    let mode = input.u8()?;
    let hue = input.u8()?;
    match (mode, hue) {
        (BLEND_JUMP, 0) => Ok(Blend::Jump),
        (BLEND_RGB, 0) => Ok(Blend::Rgb),
        (BLEND_JUMP | BLEND_RGB, _) => {
            Err(DecodeError::ParameterOutOfRange("hue direction on a non-hsv blend"))
        }
        (BLEND_HSV, HUE_FORWARD) => Ok(Blend::Hsv(HueDirection::Forward)),
        (BLEND_HSV, HUE_BACKWARD) => Ok(Blend::Hsv(HueDirection::Backward)),
        (BLEND_HSV, HUE_SHORTEST) => Ok(Blend::Hsv(HueDirection::Shortest)),
        (BLEND_HSV, value) => Err(DecodeError::UnknownTag {
            field: "hue direction",
            value,
        }),
        (value, _) => Err(DecodeError::UnknownTag {
            field: "blend",
            value,
        }),
    }
}

fn read_duration(input: &mut Reader<'_>) -> Result<DurationPolicy, DecodeError> {
    let tag = input.u8()?;
    let ms = input.u32()?;
    match tag {
        DURATION_INDEFINITE if ms == 0 => Ok(DurationPolicy::Indefinite),
        DURATION_INDEFINITE => Err(DecodeError::ParameterOutOfRange(
            "indefinite duration carries a length",
        )),
        DURATION_FIXED => NonZeroU32::new(ms)
            .map(DurationPolicy::Fixed)
            .ok_or(DecodeError::ParameterOutOfRange("fixed duration")),
        value => Err(DecodeError::UnknownTag {
            field: "duration",
            value,
        }),
    }
}
