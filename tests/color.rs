mod tests {
    use iris_cue_engine::Fraction;
    use iris_cue_engine::color::{
        BLACK, BLUE, Blend, GREEN, HueDirection, RED, Rgb, WHITE, blend_hsv, lerp, parse_hex,
        rgb2hsv, rgb_from_u32, to_hex,
    };

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(RED, BLUE, Fraction::ZERO), RED);
        assert_eq!(lerp(RED, BLUE, Fraction::ONE), BLUE);
        assert_eq!(
            lerp(RED, BLUE, Fraction::HALF),
            Rgb {
                r: 128,
                g: 0,
                b: 128
            }
        );
        assert_eq!(
            lerp(BLACK, WHITE, Fraction::HALF),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
        assert_eq!(lerp(WHITE, BLACK, Fraction::ONE), BLACK);
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(
            rgb_from_u32(0xFF_80_00),
            Rgb {
                r: 255,
                g: 128,
                b: 0
            }
        );
        assert_eq!(rgb_from_u32(0), BLACK);
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(to_hex(Rgb { r: 0x12, g: 0x34, b: 0x56 }).as_str(), "#123456");
        assert_eq!(to_hex(WHITE).as_str(), "#ffffff");
        assert_eq!(to_hex(BLACK).as_str(), "#000000");
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(parse_hex("#ff0000"), Some(RED));
        assert_eq!(parse_hex("00FF00"), Some(GREEN));
        assert_eq!(parse_hex("#12345G"), None);
        assert_eq!(parse_hex("+12345"), None);
        assert_eq!(parse_hex("#1234567"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_rgb2hsv_primaries() {
        let red = rgb2hsv(RED);
        assert_eq!((red.hue, red.sat, red.val), (0, 255, 255));
        assert_eq!(rgb2hsv(GREEN).hue, 85);
        assert_eq!(rgb2hsv(BLUE).hue, 171);

        let grey = rgb2hsv(Rgb {
            r: 90,
            g: 90,
            b: 90,
        });
        assert_eq!((grey.hue, grey.sat, grey.val), (0, 0, 90));
    }

    #[test]
    fn test_jump_blend_holds_until_one() {
        assert_eq!(Blend::Jump.mix(RED, BLUE, Fraction::ZERO), RED);
        assert_eq!(Blend::Jump.mix(RED, BLUE, Fraction::from_raw(0xFFFF)), RED);
        assert_eq!(Blend::Jump.mix(RED, BLUE, Fraction::ONE), BLUE);
    }

    #[test]
    fn test_hsv_fade_to_black_keeps_hue() {
        let half = blend_hsv(RED, BLACK, Fraction::HALF, HueDirection::Shortest);
        assert_eq!(half, Rgb { r: 128, g: 0, b: 0 });
    }

    #[test]
    fn test_hsv_direction_changes_path() {
        // Red to blue forward sweeps through green
        let forward = blend_hsv(RED, BLUE, Fraction::HALF, HueDirection::Forward);
        assert_eq!(forward.g, 255);

        // The short way round passes through magenta
        let shortest = blend_hsv(RED, BLUE, Fraction::HALF, HueDirection::Shortest);
        assert_eq!(shortest.g, 0);
        assert!(shortest.r > 0 && shortest.b > 0);
    }

    #[test]
    fn test_hsv_blend_endpoints() {
        let blend = Blend::Hsv(HueDirection::Backward);
        assert_eq!(blend.mix(RED, RED, Fraction::HALF), RED);
        assert_eq!(blend.mix(BLACK, BLACK, Fraction::HALF), BLACK);
    }
}
