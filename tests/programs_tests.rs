// Host-side tests for shader template composition.

use new2canada_fx::distortion::{DistortionStrategy, MOUNTAIN, TURBULENT};
use new2canada_fx::programs::{
    Slot, IRIDESCENCE_WGSL, POST_WGSL, ROAD_PROGRAM, SCENE_PRELUDE_WGSL, SCENE_PROGRAMS,
};

#[test]
fn every_scene_program_has_one_distortion_slot() {
    for program in SCENE_PROGRAMS {
        let slots: Vec<Slot> = program.slots().collect();
        assert_eq!(slots, vec![Slot::Distortion], "{}", program.label);
    }
}

#[test]
fn composition_splices_the_strategy_between_prelude_and_body() {
    for program in SCENE_PROGRAMS {
        let src = program.compose(&MOUNTAIN);
        let prelude = src.find("fn travel_time").expect("prelude");
        let distortion = src.find("fn get_distortion").expect("distortion");
        let vs = src
            .find(&format!("fn {}", program.vs_entry))
            .expect("vertex entry");
        assert!(prelude < distortion && distortion < vs, "{}", program.label);
        assert!(src.contains(&format!("fn {}", program.fs_entry)));
        assert!(src.contains("// distortion: mountain"));
        assert!(src.contains(&MOUNTAIN.wgsl()));
    }
}

#[test]
fn composition_depends_only_on_the_strategy() {
    let a = ROAD_PROGRAM.compose(&TURBULENT);
    let b = ROAD_PROGRAM.compose(&TURBULENT);
    let c = ROAD_PROGRAM.compose(&MOUNTAIN);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.matches("fn get_distortion").count(), 1);
}

#[test]
fn standalone_programs_define_their_entry_points() {
    assert!(SCENE_PRELUDE_WGSL.contains("fn travel_time"));
    assert!(!SCENE_PRELUDE_WGSL.contains("fn get_distortion"));
    assert!(IRIDESCENCE_WGSL.contains("fn vs_fullscreen"));
    assert!(IRIDESCENCE_WGSL.contains("fn fs_iridescence"));
    for entry in ["fs_bright", "fs_blur", "fs_composite", "fs_fxaa"] {
        assert!(POST_WGSL.contains(&format!("fn {entry}")), "{entry}");
    }
}
