//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::color::Rgb;
use crate::command::{CommandProcessor, CommandReport};
use crate::engine::Engine;

/// Default target frame rate (20 FPS).
pub const DEFAULT_FPS: u32 = 20;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Project a monotonic instant onto the engine's wrapping 32-bit millisecond clock
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn wrapping_millis(now: Instant) -> u32 {
    now.as_millis() as u32
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Commands applied before this frame was rendered.
    pub commands: CommandReport,
}

/// Portable frame scheduler that manages timing without async.
///
/// Each tick drains pending commands into the engine, renders every channel
/// and hands the frame to the output driver.
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandQueue<8> = CommandQueue::new();
///
/// let processor = CommandProcessor::new(COMMANDS.receiver());
/// let mut scheduler = FrameScheduler::<_, 16, 8, 12>::new(Engine::default(), processor, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    const CUES: usize,
    const QUEUE_SIZE: usize,
    const MAX_LEDS: usize,
> {
    output: O,
    engine: Engine<CUES>,
    commands: CommandProcessor<'a, QUEUE_SIZE>,
    frame: [Rgb; MAX_LEDS],
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const CUES: usize, const QUEUE_SIZE: usize, const MAX_LEDS: usize>
    FrameScheduler<'a, O, CUES, QUEUE_SIZE, MAX_LEDS>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (20 FPS) for frame timing.
    pub fn new(engine: Engine<CUES>, commands: CommandProcessor<'a, QUEUE_SIZE>, driver: O) -> Self {
        Self::with_frame_duration(engine, commands, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        engine: Engine<CUES>,
        commands: CommandProcessor<'a, QUEUE_SIZE>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            engine,
            commands,
            frame: [Rgb::default(); MAX_LEDS],
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies queued commands
    /// 3. Renders the current frame and writes it to the output driver
    /// 4. Returns the deadline for the next frame
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Past two frames behind, skip the backlog instead of bursting
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        let now_ms = wrapping_millis(now);
        let commands = self.commands.apply_pending(&mut self.engine, now_ms);

        let frame = self.engine.render(now_ms, &mut self.frame);
        self.output.write(frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            commands,
        }
    }

    pub fn engine(&self) -> &Engine<CUES> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<CUES> {
        &mut self.engine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}
