//! GPU program library.
//!
//! Scene programs are assembled from fixed WGSL text and named slots. The only
//! slot today is the distortion function, filled from the strategy chosen for
//! the instance; nothing is located or patched by string search.

use crate::distortion::DistortionStrategy;

pub const SCENE_PRELUDE_WGSL: &str = include_str!("../shaders/scene_prelude.wgsl");
pub const ROAD_WGSL: &str = include_str!("../shaders/road.wgsl");
pub const CAR_LIGHTS_WGSL: &str = include_str!("../shaders/car_lights.wgsl");
pub const LIGHT_STICKS_WGSL: &str = include_str!("../shaders/light_sticks.wgsl");
pub const IRIDESCENCE_WGSL: &str = include_str!("../shaders/iridescence.wgsl");
pub const POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// `fn get_distortion(progress: f32) -> vec3<f32>`
    Distortion,
}

#[derive(Clone, Copy, Debug)]
pub enum Part {
    Text(&'static str),
    Slot(Slot),
}

/// An ordered list of source parts plus the entry points they define.
#[derive(Clone, Copy, Debug)]
pub struct ProgramTemplate {
    pub label: &'static str,
    pub parts: &'static [Part],
    pub vs_entry: &'static str,
    pub fs_entry: &'static str,
}

impl ProgramTemplate {
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.parts.iter().filter_map(|p| match p {
            Part::Slot(s) => Some(*s),
            Part::Text(_) => None,
        })
    }

    pub fn compose(&self, distortion: &dyn DistortionStrategy) -> String {
        let mut out = String::new();
        for part in self.parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Slot(Slot::Distortion) => {
                    out.push_str("// distortion: ");
                    out.push_str(distortion.name());
                    out.push('\n');
                    out.push_str(&distortion.wgsl());
                }
            }
            out.push('\n');
        }
        out
    }
}

pub const ROAD_PROGRAM: ProgramTemplate = ProgramTemplate {
    label: "road",
    parts: &[
        Part::Text(SCENE_PRELUDE_WGSL),
        Part::Slot(Slot::Distortion),
        Part::Text(ROAD_WGSL),
    ],
    vs_entry: "vs_road",
    fs_entry: "fs_road",
};

pub const CAR_LIGHTS_PROGRAM: ProgramTemplate = ProgramTemplate {
    label: "car_lights",
    parts: &[
        Part::Text(SCENE_PRELUDE_WGSL),
        Part::Slot(Slot::Distortion),
        Part::Text(CAR_LIGHTS_WGSL),
    ],
    vs_entry: "vs_car_light",
    fs_entry: "fs_car_light",
};

pub const LIGHT_STICKS_PROGRAM: ProgramTemplate = ProgramTemplate {
    label: "light_sticks",
    parts: &[
        Part::Text(SCENE_PRELUDE_WGSL),
        Part::Slot(Slot::Distortion),
        Part::Text(LIGHT_STICKS_WGSL),
    ],
    vs_entry: "vs_light_stick",
    fs_entry: "fs_light_stick",
};

pub const SCENE_PROGRAMS: [ProgramTemplate; 3] =
    [ROAD_PROGRAM, CAR_LIGHTS_PROGRAM, LIGHT_STICKS_PROGRAM];
