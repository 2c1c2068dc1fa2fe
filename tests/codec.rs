mod tests {
    use core::num::{NonZeroU8, NonZeroU32};

    use iris_cue_engine::codec::{
        FORMAT_VERSION, MAX_CUE_LEN, decode, decode_registry, encode, encode_into,
        encode_registry_into, max_registry_len,
    };
    use iris_cue_engine::color::{BLACK, BLUE, Blend, GREEN, HueDirection, RED, WHITE};
    use iris_cue_engine::cue::{Chase, Palette, Rainbow};
    use iris_cue_engine::{
        ChannelMask, Cue, CueKind, CueRegistry, DecodeError, Direction, DurationPolicy, EncodeError,
    };

    fn full_chase() -> Cue {
        let palette = Palette::new(&[RED, GREEN, BLUE, WHITE, BLACK, RED, GREEN, BLUE]).unwrap();
        let chase = Chase::new(palette, NonZeroU32::new(2400).unwrap())
            .with_repeats(NonZeroU8::new(3).unwrap())
            .with_direction(Direction::Reverse)
            .with_blend(Blend::Hsv(HueDirection::Backward));
        Cue::new(CueKind::Chase(chase)).with_duration(DurationPolicy::fixed(2500).unwrap())
    }

    #[test]
    fn test_solid_layout() {
        let bytes = encode(&Cue::solid(RED));
        assert_eq!(
            bytes.as_slice(),
            &[FORMAT_VERSION, 0, 255, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0x0F]
        );
    }

    #[test]
    fn test_fixed_duration_layout() {
        let cue = Cue::solid(BLUE).with_duration(DurationPolicy::fixed(0x0102_0304).unwrap());
        let bytes = encode(&cue);
        assert_eq!(&bytes[5..10], &[1, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_round_trip() {
        let rainbow = Rainbow::new(NonZeroU32::new(777).unwrap())
            .with_saturation(200)
            .with_value(90)
            .with_repeats(NonZeroU8::new(2).unwrap());
        let cues = [
            Cue::solid(GREEN),
            Cue::blackout(),
            Cue::rainbow(),
            Cue::black_white_jump(),
            Cue::white_breathing(),
            Cue::hue_pulse(RED, BLUE, 900).unwrap(),
            Cue::strobe(WHITE, 120, 40).unwrap(),
            Cue::new(CueKind::Rainbow(rainbow)),
            full_chase(),
            Cue::rainbow().with_channel_mask(ChannelMask::from_bits(0x0A5A).unwrap()),
            Cue::solid(RED).with_channel_mask(ChannelMask::NONE),
        ];
        for cue in cues {
            assert_eq!(decode(&encode(&cue)), Ok(cue));
        }
    }

    #[test]
    fn test_full_palette_fills_max_len() {
        assert_eq!(encode(&full_chase()).len(), MAX_CUE_LEN);
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let mut buf = [0; 4];
        assert_eq!(
            encode_into(&Cue::solid(RED), &mut buf),
            Err(EncodeError::BufferTooSmall {
                needed: 5,
                available: 4
            })
        );

        let mut buf = [0; 16];
        assert_eq!(encode_into(&Cue::solid(RED), &mut buf), Ok(12));
    }

    #[test]
    fn test_decode_rejects_bad_header() {
        assert_eq!(decode(&[]), Err(DecodeError::Truncated));
        assert_eq!(decode(&[2, 0]), Err(DecodeError::UnsupportedVersion(2)));
        assert_eq!(
            decode(&[FORMAT_VERSION, 9]),
            Err(DecodeError::UnknownTag {
                field: "cue kind",
                value: 9
            })
        );
    }

    #[test]
    fn test_every_prefix_is_truncated() {
        let bytes = encode(&Cue::hue_pulse(RED, BLUE, 900).unwrap());
        for len in 0..bytes.len() {
            assert_eq!(decode(&bytes[..len]), Err(DecodeError::Truncated));
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = encode(&Cue::solid(RED));
        bytes.push(0).unwrap();
        assert_eq!(decode(&bytes), Err(DecodeError::TrailingBytes));
    }

    #[test]
    fn test_pulse_field_validation() {
        // [version kind start:3 end:3 period:4 ramp blend:2 duration:5 mask:2]
        let valid = encode(&Cue::pulse(BLACK, WHITE, 1000).unwrap());
        assert_eq!(valid.len(), 22);

        let mut bytes = valid.clone();
        bytes[8..12].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(decode(&bytes), Err(DecodeError::ParameterOutOfRange("period")));

        let mut bytes = valid.clone();
        bytes[12] = 0;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::ParameterOutOfRange("pulse ramp ratio"))
        );

        let mut bytes = valid.clone();
        bytes[13] = 3;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::UnknownTag {
                field: "blend",
                value: 3
            })
        );

        let mut bytes = valid.clone();
        bytes[14] = 1;
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::ParameterOutOfRange(_))
        ));

        let mut bytes = valid.clone();
        bytes[13] = 2;
        bytes[14] = 7;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::UnknownTag {
                field: "hue direction",
                value: 7
            })
        );
    }

    #[test]
    fn test_duration_validation() {
        let valid = encode(&Cue::solid(RED));

        let mut bytes = valid.clone();
        bytes[5] = 2;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::UnknownTag {
                field: "duration",
                value: 2
            })
        );

        let mut bytes = valid.clone();
        bytes[6] = 5;
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::ParameterOutOfRange(_))
        ));

        let mut bytes = valid.clone();
        bytes[5] = 1;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::ParameterOutOfRange("fixed duration"))
        );
    }

    #[test]
    fn test_chase_field_validation() {
        // [version kind period:4 repeats direction blend:2 count stops:3*count duration:5 mask:2]
        let valid = encode(&Cue::chase(&[RED, GREEN], 1000).unwrap());
        assert_eq!(valid.len(), 24);

        let mut bytes = valid.clone();
        bytes[6] = 0;
        assert_eq!(decode(&bytes), Err(DecodeError::ParameterOutOfRange("repeats")));

        let mut bytes = valid.clone();
        bytes[7] = 2;
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::UnknownTag {
                field: "direction",
                value: 2
            })
        );

        for count in [0, 9, u8::MAX] {
            let mut bytes = valid.clone();
            bytes[10] = count;
            assert_eq!(
                decode(&bytes),
                Err(DecodeError::ParameterOutOfRange("palette stop count"))
            );
        }

        // A count larger than the stops actually sent runs out of bytes
        let mut bytes = valid.clone();
        bytes[10] = 3;
        assert_eq!(decode(&bytes), Err(DecodeError::Truncated));
    }

    #[test]
    fn test_strobe_on_duration_validation() {
        // [version kind on:3 off:3 period:4 on_ms:4 duration:5 mask:2]
        let mut bytes = encode(&Cue::strobe(WHITE, 100, 40).unwrap());
        bytes[12..16].copy_from_slice(&101u32.to_le_bytes());
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::ParameterOutOfRange("strobe on-duration"))
        );
    }

    #[test]
    fn test_channel_mask_layout() {
        let cue = Cue::solid(RED)
            .with_channel(0, false)
            .unwrap()
            .with_channel(11, false)
            .unwrap();
        let bytes = encode(&cue);
        assert_eq!(&bytes[10..], &[0xFE, 0x07]);
        assert_eq!(decode(&bytes).map(|cue| cue.channel_mask().bits()), Ok(0x07FE));
    }

    #[test]
    fn test_channel_mask_validation() {
        for mask in [0x1000u16, 0x8FFF, u16::MAX] {
            let mut bytes = encode(&Cue::solid(RED));
            bytes[10..12].copy_from_slice(&mask.to_le_bytes());
            assert_eq!(
                decode(&bytes),
                Err(DecodeError::ParameterOutOfRange("channel mask"))
            );
        }

        // A frame cut off inside the mask
        let bytes = encode(&Cue::solid(RED));
        assert_eq!(decode(&bytes[..11]), Err(DecodeError::Truncated));
    }

    fn sample_registry() -> CueRegistry<4> {
        let mut registry = CueRegistry::new();
        registry.add(Cue::solid(RED)).unwrap();
        registry.add(full_chase()).unwrap();
        registry.add(Cue::white_breathing()).unwrap();
        registry
    }

    #[test]
    fn test_registry_round_trip() {
        let registry = sample_registry();
        let mut buf = [0; max_registry_len(4)];
        let len = encode_registry_into(&registry, &mut buf).unwrap();
        assert_eq!(&buf[..2], &[FORMAT_VERSION, 3]);

        let decoded = decode_registry::<4>(&buf[..len]).unwrap();
        assert!(decoded.iter().eq(registry.iter()));
    }

    #[test]
    fn test_empty_registry() {
        let registry = CueRegistry::<4>::new();
        let mut buf = [0; 8];
        assert_eq!(encode_registry_into(&registry, &mut buf), Ok(2));
        assert!(decode_registry::<4>(&buf[..2]).unwrap().is_empty());
    }

    #[test]
    fn test_registry_decode_errors() {
        let registry = sample_registry();
        let mut buf = [0; max_registry_len(4)];
        let len = encode_registry_into(&registry, &mut buf).unwrap();

        assert_eq!(
            decode_registry::<2>(&buf[..len]).map(|r| r.len()),
            Err(DecodeError::TooManyCues { capacity: 2 })
        );
        assert_eq!(
            decode_registry::<4>(&buf[..len - 1]).map(|r| r.len()),
            Err(DecodeError::Truncated)
        );
        assert_eq!(
            decode_registry::<4>(&buf[..=len]).map(|r| r.len()),
            Err(DecodeError::TrailingBytes)
        );

        buf[0] = 7;
        assert_eq!(
            decode_registry::<4>(&buf[..len]).map(|r| r.len()),
            Err(DecodeError::UnsupportedVersion(7))
        );
    }

    #[test]
    fn test_registry_encode_small_buffer() {
        let registry = sample_registry();
        let mut buf = [0; 16];
        assert!(matches!(
            encode_registry_into(&registry, &mut buf),
            Err(EncodeError::BufferTooSmall { .. })
        ));
    }
}
