// Host-side tests for distortion strategies and their registry.

use new2canada_fx::distortion::{
    Distortion, DistortionRegistry, DistortionStrategy, BUILTIN_STRATEGIES, MOUNTAIN, TURBULENT,
    XY,
};

#[test]
fn builtin_registry_lists_every_strategy() {
    let registry = DistortionRegistry::builtin();
    assert_eq!(registry.names(), vec!["mountain", "turbulent", "xy"]);
    assert!(DistortionRegistry::empty().names().is_empty());
    assert_eq!(Distortion::default().name(), "turbulent");
}

#[test]
fn lookup_ignores_case_whitespace_and_suffix() {
    let registry = DistortionRegistry::builtin();
    for name in ["turbulent", "Turbulent", " turbulentDistortion ", "TURBULENTDISTORTION"] {
        assert_eq!(registry.get(name).map(|d| d.name()), Some("turbulent"), "{name}");
    }
    assert_eq!(registry.get("mountainDistortion").map(|d| d.name()), Some("mountain"));
    assert!(registry.get("distortion").is_none());
    assert!(registry.get("deep").is_none());
}

#[test]
fn registering_an_existing_name_returns_the_previous_strategy() {
    let mut registry = DistortionRegistry::empty();
    assert!(registry.register(&XY).is_none());
    let previous = registry.register(&XY).map(|d| d.name());
    assert_eq!(previous, Some("xy"));
}

#[test]
fn offsets_vanish_at_each_anchor() {
    for t in [0.0f32, 1.7, 42.0] {
        assert!(TURBULENT.offset(0.0125, t).length() < 1e-4);
        assert!(MOUNTAIN.offset(0.02, t).length() < 1e-4);
        assert!(XY.offset(0.02, t).length() < 1e-4);
    }
}

#[test]
fn offsets_are_finite_along_the_whole_road() {
    for strategy in BUILTIN_STRATEGIES {
        for i in 0..=20 {
            let p = i as f32 / 20.0;
            let v = strategy.offset(p, 3.3);
            assert!(v.is_finite(), "{} at {p}", strategy.name());
        }
    }
}

#[test]
fn flat_axes_stay_flat() {
    for t in [0.0f32, 2.0, 9.0] {
        assert_eq!(TURBULENT.offset(0.6, t).z, 0.0);
        assert_eq!(XY.offset(0.6, t).z, 0.0);
    }
}

#[test]
fn look_at_follows_the_bend_ahead() {
    for strategy in BUILTIN_STRATEGIES {
        let (p, t) = (0.025, 5.0);
        let bend = strategy.offset(p, t) - strategy.offset(p + strategy.look_ahead(), t);
        let expected = bend * strategy.look_at_amp() + strategy.look_at_offset();
        let got = strategy.look_at(p, t);
        assert!((got - expected).length() < 1e-5, "{}", strategy.name());
    }
    // strategies without depth displacement look straight down the road
    assert_eq!(TURBULENT.look_at(0.025, 1.0).z, -10.0);
    assert_eq!(XY.look_at(0.025, 1.0).z, -3.0);
}

#[test]
fn wgsl_defines_get_distortion_with_host_constants() {
    let turbulent = TURBULENT.wgsl();
    assert!(turbulent.contains("fn get_distortion(progress: f32) -> vec3<f32>"));
    assert!(turbulent.contains("25.0"));
    assert!(turbulent.contains("0.0125"));

    let mountain = MOUNTAIN.wgsl();
    assert!(mountain.contains("fn get_distortion"));
    assert!(mountain.contains("30.0"));

    let xy = XY.wgsl();
    assert!(xy.contains("fn get_distortion"));
    assert!(xy.contains("PI / 2.0"));
}
