// Host-side tests for pure input functions.
// The input module is dependency-free, so it is included directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn pointer_is_normalized_over_the_host_rect_with_y_up() {
    let uv = normalized_pointer(150.0, 50.0, 100.0, 0.0, 200.0, 100.0).unwrap();
    assert!((uv[0] - 0.25).abs() < 1e-6);
    assert!((uv[1] - 0.5).abs() < 1e-6);

    // top-left corner of the host maps to (0, 1)
    let uv = normalized_pointer(100.0, 0.0, 100.0, 0.0, 200.0, 100.0).unwrap();
    assert_eq!(uv, [0.0, 1.0]);
}

#[test]
fn pointer_outside_the_rect_is_clamped() {
    let uv = normalized_pointer(-50.0, 500.0, 0.0, 0.0, 100.0, 100.0).unwrap();
    assert_eq!(uv, [0.0, 0.0]);
    let uv = normalized_pointer(500.0, -50.0, 0.0, 0.0, 100.0, 100.0).unwrap();
    assert_eq!(uv, [1.0, 1.0]);
}

#[test]
fn pointer_over_an_empty_rect_is_none() {
    assert!(normalized_pointer(10.0, 10.0, 0.0, 0.0, 0.0, 100.0).is_none());
    assert!(normalized_pointer(10.0, 10.0, 0.0, 0.0, 100.0, -1.0).is_none());
}

#[test]
fn backing_size_scales_by_capped_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 1.0, 2.0), (800, 600));
    assert_eq!(backing_size(400.0, 300.0, 1.5, 2.0), (600, 450));
    assert_eq!(backing_size(400.0, 300.0, 3.0, 2.0), (800, 600));
}

#[test]
fn backing_size_floors_fractions_and_tolerates_bad_input() {
    assert_eq!(backing_size(100.7, 50.2, 1.0, 2.0), (100, 50));
    assert_eq!(backing_size(100.0, 50.0, f64::NAN, 2.0), (100, 50));
    assert_eq!(backing_size(100.0, 50.0, 0.0, 2.0), (100, 50));
    assert_eq!(backing_size(-10.0, 0.0, 2.0, 2.0), (0, 0));
}

#[test]
fn only_static_hosts_get_a_containing_block() {
    assert!(needs_containing_block("static"));
    assert!(needs_containing_block(" Static "));
    for kept in ["fixed", "absolute", "relative", "sticky", ""] {
        assert!(!needs_containing_block(kept), "{kept:?} would be overridden");
    }
}

#[test]
fn canvas_sits_under_host_content() {
    let decls: Vec<&str> = CANVAS_STYLE
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    for expected in ["position:absolute", "inset:0", "z-index:-1", "pointer-events:none"] {
        assert!(decls.contains(&expected), "missing {expected}");
    }
}
