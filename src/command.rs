//! Interrupt-safe command queue feeding the engine
//!
//! A transport (serial, radio, BLE) pushes [`Command`]s from any context;
//! the render loop drains them between frames with [`CommandProcessor`].
//! Built on `critical-section` and `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Deque;

use crate::cue::Cue;
use crate::engine::Engine;
use crate::error::Error;

/// A mutation to apply to the engine on the render loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a cue to the registry
    AddCue(Cue),
    /// Overwrite the cue at `index`
    ReplaceCue { index: usize, cue: Cue },
    /// Blank the cue at `index`
    RemoveCue(usize),
    /// Launch the cue at `index`, timed from when the command is applied
    LaunchCue(usize),
    /// Return to idle
    Stop,
}

/// Returned when the queue is full; carries the rejected command back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrySendError(pub Command);

/// Returned when the queue is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded queue of engine commands
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Command, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers; any number may coexist
    pub const fn sender(&self) -> Sender<'_, SIZE> {
        Sender { queue: self }
    }

    /// Handle for the render loop
    pub const fn receiver(&self) -> Receiver<'_, SIZE> {
        Receiver { queue: self }
    }

    pub fn try_send(&self, command: Command) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Result<Command, TryReceiveError> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct Sender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> Sender<'_, SIZE> {
    pub fn try_send(&self, command: Command) -> Result<(), TrySendError> {
        self.queue.try_send(command)
    }
}

#[derive(Clone, Copy)]
pub struct Receiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> Receiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<Command, TryReceiveError> {
        self.queue.try_receive()
    }
}

/// Outcome of draining the queue once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandReport {
    pub applied: usize,
    pub failed: usize,
    /// Most recent failure, if any
    pub last_error: Option<Error>,
}

impl CommandReport {
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Drains queued commands into an engine
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: Receiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    pub const fn new(commands: Receiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Apply every pending command in arrival order (non-blocking)
    ///
    /// A failing command is counted and skipped; the rest still apply.
    pub fn apply_pending<const CUES: usize>(
        &mut self,
        engine: &mut Engine<CUES>,
        now_ms: u32,
    ) -> CommandReport {
        let mut report = CommandReport::default();

        while let Ok(command) = self.commands.try_receive() {
            match Self::apply(engine, command, now_ms) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[command] rejected: {}", err);
                    report.failed += 1;
                    report.last_error = Some(err);
                }
            }
        }

        report
    }

    fn apply<const CUES: usize>(
        engine: &mut Engine<CUES>,
        command: Command,
        now_ms: u32,
    ) -> Result<(), Error> {
        match command {
            Command::AddCue(cue) => engine.add_cue(cue).map(drop),
            Command::ReplaceCue { index, cue } => engine.replace_cue(index, cue).map(drop),
            Command::RemoveCue(index) => engine.remove_cue(index).map(drop),
            Command::LaunchCue(index) => engine.launch_cue(index, now_ms),
            Command::Stop => {
                engine.stop();
                Ok(())
            }
        }
    }
}
