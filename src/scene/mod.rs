//! CPU-side geometry and instanced attributes.
//!
//! Everything here is built once per effect instance and is immutable
//! afterwards; the GPU backend uploads it verbatim.

mod geometry;
mod lights;

pub use geometry::{quad, road_plane, tube};
pub use lights::{car_lights, light_sticks};

use crate::config::{Color, HyperspeedOptions};
use crate::constants::{
    LIGHT_STICK_SPEED, ROAD_SEGMENTS_X, ROAD_SEGMENTS_Z, TUBE_LENGTH_SEGMENTS,
    TUBE_RADIAL_SEGMENTS,
};
use bytemuck::{Pod, Zeroable};
use rand::Rng;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TubeVertex {
    pub position: [f32; 3],
    pub along: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub corner: [f32; 2],
}

/// One lamp of a car-light pair.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CarLightInstance {
    pub offset: [f32; 3],
    /// radius, streak length, travel speed
    pub metrics: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightStickInstance {
    pub offset: f32,
    /// width, height
    pub size: [f32; 2],
    pub color: [f32; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Mesh<V> {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Identifies a static GPU draw; each maps to one program and one set of
/// object uniforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshId {
    FullscreenTriangle,
    RoadLeft,
    RoadRight,
    Island,
    LightSticks,
    CarLightsLeft,
    CarLightsRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub mesh: MeshId,
    /// vertex count when not `indexed`, else index count
    pub elements: u32,
    pub instances: u32,
    pub indexed: bool,
}

impl DrawCall {
    pub const FULLSCREEN: DrawCall = DrawCall {
        mesh: MeshId::FullscreenTriangle,
        elements: 3,
        instances: 1,
        indexed: false,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoadStrip {
    pub id: MeshId,
    pub mesh: Mesh<SurfaceVertex>,
    pub offset_x: f32,
    pub color: Color,
    pub markings: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarLightSet {
    pub id: MeshId,
    pub instances: Vec<CarLightInstance>,
    pub offset_x: f32,
    /// alpha ramp endpoints along the streak
    pub fade: [f32; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightStickSet {
    pub instances: Vec<LightStickInstance>,
    pub offset_x: f32,
    pub speed: f32,
}

/// Road, car lights and light sticks, in build order.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperspeedScene {
    pub roads: Vec<RoadStrip>,
    pub tube: Mesh<TubeVertex>,
    pub quad: Mesh<QuadVertex>,
    pub car_lights: [CarLightSet; 2],
    pub sticks: LightStickSet,
}

impl HyperspeedScene {
    pub fn build<R: Rng + ?Sized>(options: &HyperspeedOptions, rng: &mut R) -> Self {
        let road_offset = options.island_width * 0.5 + options.road_width * 0.5;
        let road = |id, offset_x, color, markings| RoadStrip {
            id,
            mesh: road_plane(
                options.road_width,
                options.length,
                ROAD_SEGMENTS_X,
                ROAD_SEGMENTS_Z,
            ),
            offset_x,
            color,
            markings,
        };
        let mut roads = vec![
            road(MeshId::RoadLeft, -road_offset, options.colors.road, true),
            road(MeshId::RoadRight, road_offset, options.colors.road, true),
        ];
        if options.island_width > 0.0 {
            roads.push(RoadStrip {
                id: MeshId::Island,
                mesh: road_plane(options.island_width, options.length, 1, ROAD_SEGMENTS_Z),
                offset_x: 0.0,
                color: options.colors.island,
                markings: false,
            });
        }

        let fade = options.car_lights_fade;
        let left = CarLightSet {
            id: MeshId::CarLightsLeft,
            instances: car_lights(
                options,
                options.moving_away_speed,
                &options.colors.left_cars,
                rng,
            ),
            offset_x: -road_offset,
            fade: [0.0, 1.0 - fade],
        };
        let right = CarLightSet {
            id: MeshId::CarLightsRight,
            instances: car_lights(
                options,
                options.moving_closer_speed,
                &options.colors.right_cars,
                rng,
            ),
            offset_x: road_offset,
            fade: [1.0, fade],
        };

        let sticks = LightStickSet {
            instances: light_sticks(options, rng),
            offset_x: -(options.road_width + options.island_width * 0.5),
            speed: LIGHT_STICK_SPEED,
        };

        Self {
            roads,
            tube: tube(TUBE_RADIAL_SEGMENTS, TUBE_LENGTH_SEGMENTS),
            quad: quad(),
            car_lights: [left, right],
            sticks,
        }
    }

    /// Static draw list: opaque road first, then sticks, then the blended
    /// light streaks.
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        let mut draws: Vec<DrawCall> = self
            .roads
            .iter()
            .map(|r| DrawCall {
                mesh: r.id,
                elements: r.mesh.index_count(),
                instances: 1,
                indexed: true,
            })
            .collect();
        draws.push(DrawCall {
            mesh: MeshId::LightSticks,
            elements: self.quad.index_count(),
            instances: self.sticks.instances.len() as u32,
            indexed: true,
        });
        for set in &self.car_lights {
            draws.push(DrawCall {
                mesh: set.id,
                elements: self.tube.index_count(),
                instances: set.instances.len() as u32,
                indexed: true,
            });
        }
        draws
    }

    pub fn car_light_instance_count(&self) -> usize {
        self.car_lights.iter().map(|s| s.instances.len()).sum()
    }
}
