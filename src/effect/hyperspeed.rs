use super::easing::EasingState;
use super::uniforms::{ObjectUniforms, SceneUniforms};
use crate::camera::PerspectiveCamera;
use crate::config::HyperspeedOptions;
use crate::constants::{
    CAMERA_FAR, CAMERA_NEAR, CAMERA_POSITION, FOG_FAR_FACTOR, FOG_NEAR_FACTOR, LOOK_AT_PROGRESS,
};
use crate::scene::{DrawCall, HyperspeedScene, MeshId};
use glam::Vec3;
use rand::Rng;

pub struct HyperspeedState {
    options: HyperspeedOptions,
    scene: HyperspeedScene,
    draws: Vec<DrawCall>,
    objects: Vec<(MeshId, ObjectUniforms)>,
    easing: EasingState,
    camera: PerspectiveCamera,
    elapsed: f32,
}

impl HyperspeedState {
    pub fn new<R: Rng + ?Sized>(options: HyperspeedOptions, rng: &mut R) -> Self {
        let scene = HyperspeedScene::build(&options, rng);
        let draws = scene.draw_calls();
        let objects = object_uniforms(&options, &scene);
        let easing = EasingState::new(options.fov, options.fov_speed_up, options.speed_up);
        let camera = PerspectiveCamera::new(
            options.fov,
            Vec3::from(CAMERA_POSITION),
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let mut state = Self {
            options,
            scene,
            draws,
            objects,
            easing,
            camera,
            elapsed: 0.0,
        };
        state.aim_camera();
        state
    }

    pub fn options(&self) -> &HyperspeedOptions {
        &self.options
    }

    pub fn scene(&self) -> &HyperspeedScene {
        &self.scene
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Static per-draw uniforms, uploaded once by the backend.
    pub fn objects(&self) -> &[(MeshId, ObjectUniforms)] {
        &self.objects
    }

    pub fn easing(&self) -> &EasingState {
        &self.easing
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Effect time: wall-clock elapsed plus time gained while sped up.
    pub fn time(&self) -> f32 {
        self.elapsed + self.easing.time_offset
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    pub fn set_boost(&mut self, on: bool) {
        if on {
            self.easing.press();
        } else {
            self.easing.release();
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.elapsed += dt_sec;
        if self.easing.step(dt_sec) {
            self.camera.fov_deg = self.easing.fov;
        }
        self.aim_camera();
    }

    fn aim_camera(&mut self) {
        let look = self
            .options
            .distortion
            .strategy()
            .look_at(LOOK_AT_PROGRESS, self.time());
        self.camera.target = self.camera.position + look;
    }

    pub fn uniforms(&self) -> SceneUniforms {
        let p = self.camera.position;
        let length = self.options.length;
        SceneUniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            camera_pos: [p.x, p.y, p.z, 1.0],
            fog_color: self.options.colors.background.to_rgba(),
            travel: [
                length * FOG_NEAR_FACTOR,
                length * FOG_FAR_FACTOR,
                length,
                self.time(),
            ],
        }
    }
}

fn object_uniforms(
    options: &HyperspeedOptions,
    scene: &HyperspeedScene,
) -> Vec<(MeshId, ObjectUniforms)> {
    let colors = &options.colors;
    let markings = [
        options.lanes_per_road as f32,
        options.broken_lines_width_percentage,
        options.broken_lines_length_percentage,
        options.shoulder_lines_width_percentage,
    ];
    let mut objects = Vec::with_capacity(scene.roads.len() + 3);
    for road in &scene.roads {
        objects.push((
            road.id,
            ObjectUniforms {
                color: road.color.to_rgba(),
                shoulder_color: colors.shoulder_lines.to_rgba(),
                broken_color: colors.broken_lines.to_rgba(),
                placement: [road.offset_x, 0.0, 0.0, if road.markings { 1.0 } else { 0.0 }],
                markings,
                fade: [0.0; 4],
            },
        ));
    }
    objects.push((
        MeshId::LightSticks,
        ObjectUniforms {
            placement: [scene.sticks.offset_x, scene.sticks.speed, 0.0, 0.0],
            ..ObjectUniforms::default()
        },
    ));
    for set in &scene.car_lights {
        objects.push((
            set.id,
            ObjectUniforms {
                placement: [set.offset_x, 0.0, 0.0, 0.0],
                fade: [set.fade[0], set.fade[1], 0.0, 0.0],
                ..ObjectUniforms::default()
            },
        ));
    }
    objects
}
