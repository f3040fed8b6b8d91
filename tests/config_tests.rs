// Host-side tests for attribute parsing and layered configuration.

use glam::Vec3;
use new2canada_fx::config::{
    parse_bool, parse_number, parse_palette, parse_range, AttrError, Color, EffectConfig,
    EffectKind, HyperspeedOptions, IridescenceOptions, Range,
};
use new2canada_fx::distortion::{DistortionRegistry, DistortionStrategy};

fn iridescence(attrs: &[(&str, &str)]) -> IridescenceOptions {
    match EffectConfig::resolve(attrs) {
        Some(EffectConfig::Iridescence(o)) => o,
        other => panic!("expected iridescence, got {other:?}"),
    }
}

fn hyperspeed(attrs: &[(&str, &str)]) -> HyperspeedOptions {
    match EffectConfig::resolve(attrs) {
        Some(EffectConfig::Hyperspeed(o)) => o,
        other => panic!("expected hyperspeed, got {other:?}"),
    }
}

fn close(a: Color, b: Color) -> bool {
    (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
}

#[test]
fn hosts_without_a_known_effect_resolve_to_nothing() {
    let none: [(&str, &str); 0] = [];
    assert!(EffectConfig::resolve(&none).is_none());
    assert!(EffectConfig::resolve(&[("data-effect", "confetti")]).is_none());
    let cfg = EffectConfig::resolve(&[("data-effect", " Hyperspeed ")]).unwrap();
    assert_eq!(cfg.kind(), EffectKind::Hyperspeed);
}

#[test]
fn declared_numbers_win_and_missing_ones_default() {
    let o = iridescence(&[("data-effect", "iridescence"), ("data-speed", "1.25")]);
    assert_eq!(o.speed, 1.25);
    assert_eq!(o.amplitude, IridescenceOptions::default().amplitude);
}

#[test]
fn unparsable_values_fall_back_to_defaults() {
    let d = HyperspeedOptions::default();
    let o = hyperspeed(&[
        ("data-effect", "hyperspeed"),
        ("data-length", "far"),
        ("data-road-width", "-3"),
        ("data-fov", "NaN"),
        ("data-lanes-per-road", "0"),
        ("data-car-lights-fade", "7"),
        ("data-moving-away-speed", "[1, 2, 3]"),
        ("data-left-cars-colors", "[]"),
        ("data-road-color", "#12"),
    ]);
    assert_eq!(o.length, d.length);
    assert_eq!(o.road_width, d.road_width);
    assert_eq!(o.fov, d.fov);
    assert_eq!(o.lanes_per_road, d.lanes_per_road);
    assert_eq!(o.car_lights_fade, d.car_lights_fade);
    assert_eq!(o.moving_away_speed, d.moving_away_speed);
    assert_eq!(o.colors.left_cars, d.colors.left_cars);
    assert_eq!(o.colors.road, d.colors.road);
}

#[test]
fn hex_forms_and_unit_triplet_name_the_same_color() {
    let forms = ["#ffffff", "0xffffff", "[1,1,1]", "#fff", "16777215", "[255, 255, 255]"];
    for raw in forms {
        let o = iridescence(&[("data-effect", "iridescence"), ("data-color", raw)]);
        assert!(close(o.color, Color::WHITE), "{raw} -> {:?}", o.color);
    }
}

#[test]
fn color_parse_rejects_garbage() {
    assert!(matches!(Color::parse("#ggg"), Err(AttrError::NotAColor(_))));
    assert!(Color::parse("0x1234567").is_err());
    assert!(Color::parse("[1, 2]").is_err());
    assert!(Color::parse("[-1, 0, 0]").is_err());
    assert!(Color::parse("red").is_err());
}

#[test]
fn scalar_parsers() {
    assert_eq!(parse_number(" 2.5 ").unwrap(), 2.5);
    assert!(parse_number("inf").is_err());
    assert!(parse_bool("").unwrap());
    assert!(!parse_bool("Off").unwrap());
    assert!(parse_bool("maybe").is_err());
    assert_eq!(parse_range("[60, 80]").unwrap(), Range::new(60.0, 80.0));
    assert_eq!(parse_range("3").unwrap(), Range::fixed(3.0));
    assert!(parse_range("[1]").is_err());
    assert_eq!(parse_palette("#ff0000").unwrap(), vec![Color::rgb(1.0, 0.0, 0.0)]);
    assert!(parse_palette("[0xff0000]").is_err());
    assert_eq!(parse_palette("[16711680, \"#00ff00\"]").unwrap().len(), 2);
}

#[test]
fn negative_ranges_keep_their_orientation() {
    let r = Range::new(-120.0, -160.0);
    assert_eq!(r.low(), -160.0);
    assert_eq!(r.high(), -120.0);
}

#[test]
fn bare_mouse_react_attribute_reads_as_true() {
    let o = iridescence(&[
        ("data-effect", "iridescence"),
        ("data-preset", "still"),
        ("data-mouse-react", ""),
    ]);
    assert!(o.mouse_react);
}

#[test]
fn presets_sit_between_defaults_and_declared_values() {
    let preset = HyperspeedOptions::preset("mountain").unwrap();
    let o = hyperspeed(&[
        ("data-effect", "hyperspeed"),
        ("data-preset", "mountain"),
        ("data-lanes-per-road", "5"),
    ]);
    assert_eq!(o.distortion.name(), "mountain");
    assert_eq!(o.lanes_per_road, 5);
    assert_eq!(o.light_pairs_per_road_way, preset.light_pairs_per_road_way);
    assert_eq!(o.colors.left_cars, preset.colors.left_cars);

    let unknown = hyperspeed(&[("data-effect", "hyperspeed"), ("data-preset", "warp")]);
    assert_eq!(unknown, HyperspeedOptions::default());
}

#[test]
fn color_map_merges_over_defaults_and_loses_to_single_attributes() {
    let o = hyperspeed(&[
        ("data-effect", "hyperspeed"),
        (
            "data-colors",
            r##"{"roadColor": "#ff0000", "leftCars": [255, 65280], "sticks": "#00f", "bogus": 1}"##,
        ),
        ("data-road-color", "0x00ff00"),
    ]);
    let d = HyperspeedOptions::default();
    assert!(close(o.colors.road, Color::rgb(0.0, 1.0, 0.0)));
    assert_eq!(o.colors.left_cars.len(), 2);
    assert!(close(o.colors.left_cars[0], Color::rgb(0.0, 0.0, 1.0)));
    assert!(close(o.colors.sticks[0], Color::rgb(0.0, 0.0, 1.0)));
    assert_eq!(o.colors.right_cars, d.colors.right_cars);
    assert_eq!(o.colors.island, d.colors.island);
}

#[test]
fn malformed_color_map_is_ignored() {
    let o = hyperspeed(&[("data-effect", "hyperspeed"), ("data-colors", "[1, 2]")]);
    assert_eq!(o.colors, HyperspeedOptions::default().colors);
}

#[test]
fn distortion_names_are_validated_against_the_registry() {
    let o = hyperspeed(&[("data-effect", "hyperspeed"), ("data-distortion", "xyDistortion")]);
    assert_eq!(o.distortion.name(), "xy");

    let o = hyperspeed(&[("data-effect", "hyperspeed"), ("data-distortion", "spiral")]);
    assert_eq!(o.distortion.name(), "turbulent");
}

struct Flat;

impl DistortionStrategy for Flat {
    fn name(&self) -> &'static str {
        "flat"
    }
    fn wgsl(&self) -> String {
        "fn get_distortion(progress: f32) -> vec3<f32> { return vec3<f32>(0.0); }\n".into()
    }
    fn offset(&self, _progress: f32, _time: f32) -> Vec3 {
        Vec3::ZERO
    }
    fn look_ahead(&self) -> f32 {
        0.01
    }
    fn look_at_amp(&self) -> Vec3 {
        Vec3::ONE
    }
    fn look_at_offset(&self) -> Vec3 {
        Vec3::NEG_Z
    }
}

static FLAT: Flat = Flat;

#[test]
fn custom_strategies_resolve_through_a_custom_registry() {
    let mut registry = DistortionRegistry::builtin();
    assert!(registry.register(&FLAT).is_none());
    let attrs = [("data-effect", "hyperspeed"), ("data-distortion", "FLAT")];
    match EffectConfig::resolve_with(&attrs, &registry) {
        Some(EffectConfig::Hyperspeed(o)) => assert_eq!(o.distortion.name(), "flat"),
        other => panic!("unexpected {other:?}"),
    }
    // the builtin registry does not know it
    assert_eq!(hyperspeed(&attrs).distortion.name(), "turbulent");
}

#[test]
fn lane_width_divides_the_road() {
    let o = hyperspeed(&[
        ("data-effect", "hyperspeed"),
        ("data-road-width", "12"),
        ("data-lanes-per-road", "3"),
    ]);
    assert_eq!(o.lane_width(), 4.0);
}

#[test]
fn out_of_bounds_numbers_keep_defaults_and_warn() {
    let d = HyperspeedOptions::default();
    let o = hyperspeed(&[
        ("data-effect", "hyperspeed"),
        ("data-fov", "180"),
        ("data-road-width", "0"),
        ("data-car-lights-fade", "1.5"),
    ]);
    assert_eq!(o.fov, d.fov);
    assert_eq!(o.road_width, d.road_width);
    assert_eq!(o.car_lights_fade, d.car_lights_fade);

    let inside = hyperspeed(&[("data-effect", "hyperspeed"), ("data-fov", "179.5")]);
    assert_eq!(inside.fov, 179.5);

    let rejected = AttrError::OutOfBounds {
        value: 180.0,
        expected: "(0, 180)",
    };
    assert_eq!(rejected.log_level(), log::Level::Warn);
    assert_eq!(
        AttrError::NotANumber("far".into()).log_level(),
        log::Level::Debug
    );
}

#[test]
fn only_reactive_iridescence_wants_the_pointer() {
    let reactive = EffectConfig::resolve(&[("data-effect", "iridescence")]).unwrap();
    assert!(reactive.wants_pointer());

    let inert = EffectConfig::resolve(&[
        ("data-effect", "iridescence"),
        ("data-mouse-react", "false"),
    ])
    .unwrap();
    assert!(!inert.wants_pointer());

    let tunnel = EffectConfig::resolve(&[("data-effect", "hyperspeed")]).unwrap();
    assert!(!tunnel.wants_pointer());
}
