// Host-side tests for constants and their relationships.

use neural_backdrop::constants::*;
use neural_backdrop::core::constants::*;
use neural_backdrop::core::MAX_PIXEL_RATIO;

#[test]
#[allow(clippy::assertions_on_constants)]
fn counts_grow_with_intensity() {
    assert!(POINT_COUNT_HIGH > POINT_COUNT_NORMAL);
    assert!(PULSE_COUNT_HIGH > PULSE_COUNT_NORMAL);
    assert!(PULSE_COUNT_NORMAL < POINT_COUNT_NORMAL);
    assert!(HIGH_INTENSITY_FACTOR > 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn motion_scaling_is_a_reduction() {
    assert!(REDUCED_MOTION_FACTOR > 0.0 && REDUCED_MOTION_FACTOR < 1.0);
    assert!(PULSE_OPACITY_REDUCED < PULSE_OPACITY);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pulse_speeds_finish_in_bounded_frames() {
    let fastest = (PULSE_SPEED_MIN + PULSE_SPEED_SPAN) * HIGH_INTENSITY_FACTOR;
    assert!(PULSE_SPEED_MIN > 0.0);
    assert!(fastest < 1.0);
    // The slowest pulse at full motion still completes within a few seconds.
    assert!(1.0 / PULSE_SPEED_MIN <= 300.0);
}

#[test]
fn hidden_pulse_position_is_beyond_the_far_plane() {
    assert!(PULSE_HIDDEN_POSITION.length() > CAMERA_FAR);
    assert!(PULSE_HIDDEN_POSITION.x > FIELD_HALF_EXTENT.x * 10.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pointer_constants_are_consistent() {
    assert!(POINTER_CAPTURE_RADIUS_SQ > 0.0);
    assert!(POINTER_MIN_DISTANCE > 0.0);
    assert!(POINTER_MIN_DISTANCE * POINTER_MIN_DISTANCE < POINTER_CAPTURE_RADIUS_SQ);
    assert!(POINTER_FORCE > 0.0 && POINTER_FORCE < 0.1);
    assert_eq!(POINTER_WORLD_SCALE.z, 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn twinkle_and_back_brightness_stay_in_unit_range() {
    assert!(TWINKLE_BASE - TWINKLE_SPAN >= 0.0);
    assert!(TWINKLE_BASE + TWINKLE_SPAN <= 1.0);
    let back_max = BACK_BRIGHTNESS_BASE + (TWINKLE_BASE + TWINKLE_SPAN) * BACK_BRIGHTNESS_SPAN;
    assert!(back_max <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_viewport_constants_are_sane() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_DEGREES > 0.0 && CAMERA_FOV_DEGREES < 180.0);
    assert!(PARALLAX_FOLLOW > 0.0 && PARALLAX_FOLLOW < 1.0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(FALLBACK_VIEWPORT_WIDTH > 0.0 && FALLBACK_VIEWPORT_HEIGHT > 0.0);
}

#[test]
fn canvas_never_takes_pointer_events() {
    assert!(CANVAS_STYLE.contains(&("pointer-events", "none")));
    assert!(CANVAS_STYLE.contains(&("position", "absolute")));
}
