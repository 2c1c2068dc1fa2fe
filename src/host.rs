//! Process-wide engine for hosts that address the fixture through free functions
//!
//! Firmware main loops and sandboxed UI runtimes both embed the engine this
//! way: one global instance behind a critical section, mutated and polled
//! from the same thread of control.

use core::cell::RefCell;

use critical_section::Mutex;
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{HexString, Rgb, to_hex};
use crate::cue::Cue;
use crate::engine::{DEFAULT_CUE_CAPACITY, Engine, EngineConfig};
use crate::error::Result;

/// Capacity of the process-wide cue registry
pub const HOST_CUE_CAPACITY: usize = DEFAULT_CUE_CAPACITY;

type HostEngine = Engine<HOST_CUE_CAPACITY>;

static ENGINE: Mutex<RefCell<HostEngine>> =
    Mutex::new(RefCell::new(Engine::new(EngineConfig::DEFAULT)));

fn with_engine<R>(f: impl FnOnce(&mut HostEngine) -> R) -> R {
    critical_section::with(|cs| f(&mut ENGINE.borrow(cs).borrow_mut()))
}

/// Reset the global engine to the default configuration
///
/// Clears the registry and returns playback to idle.
pub fn init() {
    init_with(EngineConfig::DEFAULT);
}

/// Reset the global engine with a custom configuration
pub fn init_with(config: EngineConfig) {
    with_engine(|engine| *engine = Engine::new(config));
    #[cfg(feature = "esp32-log")]
    println!(
        "[host] engine ready: {} channels, {} cue slots",
        config.channel_count, HOST_CUE_CAPACITY
    );
}

pub fn add_cue(cue: Cue) -> Result<usize> {
    with_engine(|engine| engine.add_cue(cue))
}

/// Decode a transport payload and append it
pub fn add_encoded_cue(bytes: &[u8]) -> Result<usize> {
    with_engine(|engine| engine.add_encoded_cue(bytes))
}

pub fn replace_cue(index: usize, cue: Cue) -> Result<()> {
    with_engine(|engine| engine.replace_cue(index, cue).map(drop))
}

pub fn remove_cue(index: usize) -> Result<()> {
    with_engine(|engine| engine.remove_cue(index).map(drop))
}

/// Whether the cue at `index` drives `channel`
pub fn cue_channel(index: usize, channel: u8) -> Result<bool> {
    with_engine(|engine| {
        engine
            .registry()
            .get(index)
            .map(|cue| cue.is_channel_enabled(channel))
    })
}

pub fn set_cue_channel(index: usize, channel: u8, enabled: bool) -> Result<()> {
    with_engine(|engine| engine.set_cue_channel(index, channel, enabled))
}

pub fn launch_cue(index: usize, now_ms: u32) -> Result<()> {
    with_engine(|engine| engine.launch_cue(index, now_ms))
}

pub fn stop() {
    with_engine(HostEngine::stop);
}

/// Color of `channel` at `now_ms`; never fails
pub fn current_color(now_ms: u32, channel: u8) -> Rgb {
    with_engine(|engine| engine.current_color(now_ms, channel))
}

/// [`current_color`] as `#rrggbb`, for UI hosts that style elements with strings
pub fn current_color_hex(now_ms: u32, channel: u8) -> HexString {
    to_hex(current_color(now_ms, channel))
}

pub fn current_cue_index() -> Option<usize> {
    with_engine(|engine| engine.current_cue_index())
}

pub fn cue_count() -> usize {
    with_engine(|engine| engine.registry().len())
}

pub fn num_channels() -> u8 {
    with_engine(|engine| engine.channel_count())
}
