mod tests {
    use iris_cue_engine::color::{BLACK, RED, Rgb, WHITE, from_hsv};
    use iris_cue_engine::cue::{Chase, Palette};
    use iris_cue_engine::{ChannelMask, Cue, CueKind, Direction, DurationPolicy, Error};

    const CHANNELS: u8 = 12;

    #[test]
    fn test_solid_is_uniform() {
        let cue = Cue::solid(RED);
        for channel in 0..CHANNELS {
            assert_eq!(cue.evaluate(0, channel, CHANNELS), Ok(RED));
            assert_eq!(cue.evaluate(u32::MAX, channel, CHANNELS), Ok(RED));
        }
    }

    #[test]
    fn test_evaluate_rejects_bad_channel() {
        let cue = Cue::solid(RED);
        assert_eq!(
            cue.evaluate(0, 12, CHANNELS),
            Err(Error::InvalidChannel {
                channel: 12,
                channel_count: 12
            })
        );
        assert!(matches!(
            cue.evaluate(0, 0, 0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_constructors_reject_zero_period() {
        assert!(matches!(
            Cue::pulse(BLACK, WHITE, 0),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(Cue::chase(&[RED], 0).is_err());
        assert!(Cue::rainbow_with_period(0).is_err());
        assert!(Cue::strobe(RED, 0, 0).is_err());
    }

    #[test]
    fn test_chase_rejects_bad_palette() {
        assert!(Cue::chase(&[], 1000).is_err());
        assert!(Cue::chase(&[RED; 9], 1000).is_err());
        assert!(Cue::chase(&[RED; 8], 1000).is_ok());
    }

    #[test]
    fn test_pulse_sawtooth() {
        let cue = Cue::pulse(BLACK, WHITE, 1000).unwrap();
        let grey = Rgb {
            r: 128,
            g: 128,
            b: 128,
        };
        assert_eq!(cue.evaluate(0, 0, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(500, 5, CHANNELS), Ok(grey));
        assert_eq!(cue.evaluate(1500, 11, CHANNELS), Ok(grey));
    }

    #[test]
    fn test_strobe_duty_cycle() {
        assert!(Cue::strobe(RED, 100, 150).is_err());

        let cue = Cue::strobe(RED, 100, 30).unwrap();
        assert_eq!(cue.evaluate(0, 0, CHANNELS), Ok(RED));
        assert_eq!(cue.evaluate(29, 0, CHANNELS), Ok(RED));
        assert_eq!(cue.evaluate(30, 0, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(100, 0, CHANNELS), Ok(RED));
    }

    #[test]
    fn test_rainbow_rotates() {
        let cue = Cue::rainbow();
        assert_eq!(cue.evaluate(0, 11, CHANNELS), Ok(RED));
        assert_eq!(
            cue.evaluate(0, 5, CHANNELS),
            Ok(from_hsv(128, 255, 255))
        );
        // Half a rotation moves channel 5's hue onto channel 11
        assert_eq!(
            cue.evaluate(1500, 11, CHANNELS),
            cue.evaluate(0, 5, CHANNELS)
        );
        // A twelfth of a rotation moves every hue one channel up
        assert_eq!(
            cue.evaluate(250, 10, CHANNELS),
            cue.evaluate(0, 9, CHANNELS)
        );
    }

    #[test]
    fn test_reverse_chase_mirrors_channels() {
        let palette = Palette::new(&[RED, WHITE, BLACK]).unwrap();
        let period = core::num::NonZeroU32::new(1200).unwrap();
        let forward = Cue::new(CueKind::Chase(Chase::new(palette.clone(), period)));
        let reverse = Cue::new(CueKind::Chase(
            Chase::new(palette, period).with_direction(Direction::Reverse),
        ));
        for channel in 0..CHANNELS {
            assert_eq!(
                reverse.evaluate(300, channel, CHANNELS),
                forward.evaluate(300, CHANNELS - 1 - channel, CHANNELS)
            );
        }
    }

    #[test]
    fn test_black_white_jump_halves() {
        let cue = Cue::black_white_jump();
        assert_eq!(cue.evaluate(0, 11, CHANNELS), Ok(WHITE));
        assert_eq!(cue.evaluate(0, 6, CHANNELS), Ok(WHITE));
        assert_eq!(cue.evaluate(0, 5, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(0, 0, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(1500, 11, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(1500, 5, CHANNELS), Ok(WHITE));
    }

    #[test]
    fn test_channel_mask_darkens_channels() {
        let cue = Cue::solid(RED)
            .with_channel(2, false)
            .unwrap()
            .with_channel(7, false)
            .unwrap();
        assert!(!cue.is_channel_enabled(2));
        assert_eq!(cue.channel_mask().bits(), 0x0F7B);
        assert_eq!(cue.evaluate(0, 2, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(0, 7, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(0, 3, CHANNELS), Ok(RED));

        assert_eq!(
            Cue::solid(RED).with_channel(12, false),
            Err(Error::InvalidChannel {
                channel: 12,
                channel_count: 12
            })
        );
    }

    #[test]
    fn test_channel_mask_defaults_to_all() {
        assert_eq!(Cue::rainbow().channel_mask(), ChannelMask::ALL);
        let dark = Cue::solid(WHITE).with_channel_mask(ChannelMask::NONE);
        assert!((0..CHANNELS).all(|ch| dark.evaluate(0, ch, CHANNELS) == Ok(BLACK)));
        // Channels past the ring are not covered by the mask
        assert_eq!(dark.evaluate(0, 20, 24), Ok(WHITE));
    }

    #[test]
    fn test_white_breathing_peaks() {
        let cue = Cue::white_breathing();
        assert_eq!(cue.evaluate(0, 0, CHANNELS), Ok(BLACK));
        assert_eq!(cue.evaluate(1440, 0, CHANNELS), Ok(WHITE));
        assert_eq!(cue.evaluate(3600, 0, CHANNELS), Ok(BLACK));
    }

    #[test]
    fn test_duration_policy() {
        assert!(DurationPolicy::fixed(0).is_err());

        let cue = Cue::solid(RED).with_duration(DurationPolicy::fixed(1000).unwrap());
        assert!(!cue.is_finished(999));
        assert!(cue.is_finished(1000));
        assert!(!Cue::solid(RED).is_finished(u32::MAX));
    }

    #[test]
    fn test_default_is_blackout() {
        assert_eq!(Cue::default(), Cue::blackout());
        assert_eq!(Cue::blackout().evaluate(123, 4, CHANNELS), Ok(BLACK));
    }
}
