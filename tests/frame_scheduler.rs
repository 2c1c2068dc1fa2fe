mod tests {
    use embassy_time::{Duration, Instant};
    use iris_cue_engine::color::{BLACK, RED, Rgb};
    use iris_cue_engine::frame_scheduler::{DEFAULT_FRAME_DURATION, wrapping_millis};
    use iris_cue_engine::{
        Command, CommandProcessor, CommandQueue, Cue, Engine, FrameScheduler, OutputDriver,
    };

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    type Scheduler<'a> = FrameScheduler<'a, RecordingDriver, 4, 4, 12>;

    #[test]
    fn test_default_frame_rate() {
        assert_eq!(DEFAULT_FRAME_DURATION, Duration::from_millis(50));
    }

    #[test]
    fn test_wrapping_millis() {
        assert_eq!(wrapping_millis(Instant::from_millis(1234)), 1234);
        let past_wrap = u64::from(u32::MAX) + 5;
        assert_eq!(wrapping_millis(Instant::from_millis(past_wrap)), 4);
    }

    #[test]
    fn test_idle_tick_renders_idle_color() {
        let queue = CommandQueue::<4>::new();
        let mut scheduler = Scheduler::new(
            Engine::default(),
            CommandProcessor::new(queue.receiver()),
            RecordingDriver::default(),
        );

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(50));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));

        let frames = &scheduler.output().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], vec![BLACK; 12]);
    }

    #[test]
    fn test_commands_apply_before_render() {
        let queue = CommandQueue::<4>::new();
        let mut scheduler = Scheduler::new(
            Engine::default(),
            CommandProcessor::new(queue.receiver()),
            RecordingDriver::default(),
        );

        queue.try_send(Command::AddCue(Cue::solid(RED))).unwrap();
        queue.try_send(Command::LaunchCue(0)).unwrap();
        let result = scheduler.tick(Instant::from_millis(0));

        assert_eq!(result.commands.applied, 2);
        assert_eq!(scheduler.output().frames[0], vec![RED; 12]);
        assert_eq!(scheduler.engine().current_cue_index(), Some(0));
    }

    #[test]
    fn test_late_tick_sleeps_less() {
        let queue = CommandQueue::<4>::new();
        let mut scheduler = Scheduler::new(
            Engine::default(),
            CommandProcessor::new(queue.receiver()),
            RecordingDriver::default(),
        );

        scheduler.tick(Instant::from_millis(0));
        let result = scheduler.tick(Instant::from_millis(80));
        assert_eq!(result.next_deadline, Instant::from_millis(100));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));
    }

    #[test]
    fn test_drift_correction_skips_backlog() {
        let queue = CommandQueue::<4>::new();
        let mut scheduler = Scheduler::with_frame_duration(
            Engine::default(),
            CommandProcessor::new(queue.receiver()),
            RecordingDriver::default(),
            Duration::from_millis(10),
        );

        scheduler.tick(Instant::from_millis(0));
        let result = scheduler.tick(Instant::from_millis(1000));
        assert_eq!(result.next_deadline, Instant::from_millis(1010));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
        assert_eq!(scheduler.frame_duration(), Duration::from_millis(10));
    }
}
