//! Dashboard value formatting

/// Text shown for gear `0`.
pub const REVERSE: &str = "R";

/// Gear indicator: `0` is reverse, anything else its number.
pub fn format_gear(gear: u8) -> String {
    if gear == 0 { REVERSE.to_string() } else { gear.to_string() }
}

/// Convert meters per second to whole kilometers per hour, truncating
/// toward zero.
pub fn format_speed(speed_mps: f32) -> i64 {
    (f64::from(speed_mps) * 3600.0 / 1000.0) as i64
}

/// Fraction of the rev range in use, clamped to `[0, 1]`.
///
/// The producer reports `engine_max_rpm = 0` while in menus, so a zero
/// maximum yields `0`.
pub fn rpm_ratio(current_rpm: f32, max_rpm: f32) -> f32 {
    if max_rpm == 0.0 {
        return 0.0;
    }
    let ratio = current_rpm / max_rpm;
    if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) }
}

/// Pixel width of a bar filled to `ratio` of `width`.
pub fn bar_width(ratio: f32, width: u32) -> u32 {
    (f64::from(ratio) * f64::from(width)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_zero_max_rpm_draws_no_bar(current in 0.0f32..=f32::MAX, width in 1u32..1024) {
            prop_assert_eq!(bar_width(rpm_ratio(current, 0.0), width), 0);
        }

        #[test]
        fn prop_bar_never_exceeds_width(current in any::<f32>(), max in any::<f32>(), width in 1u32..1024) {
            prop_assert!(bar_width(rpm_ratio(current, max), width) <= width);
        }

        #[test]
        fn prop_positive_gears_render_as_numbers(gear in 1u8..=u8::MAX) {
            prop_assert_eq!(format_gear(gear), gear.to_string());
        }
    }

    #[test]
    fn gear_zero_is_reverse() {
        assert_eq!(format_gear(0), "R");
        assert_eq!(format_gear(6), "6");
    }

    #[test]
    fn speed_converts_to_kmh_truncated() {
        assert_eq!(format_speed(27.78), 100);
        assert_eq!(format_speed(0.0), 0);
        assert_eq!(format_speed(-27.78), -100);
        assert_eq!(format_speed(f32::NAN), 0);
    }

    #[test]
    fn ratio_tracks_rev_range() {
        assert_eq!(rpm_ratio(4000.0, 8000.0), 0.5);
        assert_eq!(rpm_ratio(9000.0, 8000.0), 1.0);
        assert_eq!(bar_width(0.5, 128), 64);
        assert_eq!(bar_width(1.0, 128), 128);
    }
}
