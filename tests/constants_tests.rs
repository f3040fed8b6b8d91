// Host-side tests for tuning constants and their relationships.
// The constants module has no dependencies, so it is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.1);
    assert!(MAX_PIXEL_RATIO >= 1.0);

    assert!(EASE_RATE_PER_SEC > 0.0);
    assert!(SPEED_UP_SNAP > 0.0 && SPEED_UP_SNAP < 0.01);
    assert!(FOV_SNAP > 0.0 && FOV_SNAP < 0.1);

    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(LOOK_AT_PROGRESS > 0.0 && LOOK_AT_PROGRESS < 1.0);
    assert!(FOG_NEAR_FACTOR < FOG_FAR_FACTOR);

    assert!(BLOOM_THRESHOLD >= 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(BLOOM_STRENGTH > 0.0);

    assert!(ROAD_SEGMENTS_X >= 1 && ROAD_SEGMENTS_Z >= 1);
    assert!(TUBE_RADIAL_SEGMENTS >= 3 && TUBE_LENGTH_SEGMENTS >= 1);
}

#[test]
fn ease_rate_covers_a_tenth_of_the_gap_per_60hz_frame() {
    let alpha = 1.0 - (-EASE_RATE_PER_SEC / 60.0).exp();
    assert!((alpha - 0.1).abs() < 1e-4, "alpha = {alpha}");
}

#[test]
fn camera_sits_above_and_behind_the_road_start() {
    let [x, y, z] = CAMERA_POSITION;
    assert_eq!(x, 0.0);
    assert!(y > 0.0);
    assert!(z < 0.0);
}
