use super::uniforms::IridescenceUniforms;
use crate::config::IridescenceOptions;

pub struct IridescenceState {
    options: IridescenceOptions,
    time: f32,
    size: (u32, u32),
    pointer: [f32; 2],
}

impl IridescenceState {
    pub fn new(options: IridescenceOptions) -> Self {
        Self {
            options,
            time: 0.0,
            size: (1, 1),
            pointer: [0.5, 0.5],
        }
    }

    pub fn options(&self) -> &IridescenceOptions {
        &self.options
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn pointer(&self) -> [f32; 2] {
        self.pointer
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width.max(1), height.max(1));
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.time += dt_sec;
    }

    /// Ignored unless the instance is mouse-reactive.
    pub fn pointer_moved(&mut self, uv: [f32; 2]) {
        if self.options.mouse_react {
            self.pointer = [uv[0].clamp(0.0, 1.0), uv[1].clamp(0.0, 1.0)];
        }
    }

    pub fn uniforms(&self) -> IridescenceUniforms {
        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        IridescenceUniforms {
            time: self.time,
            amplitude: self.options.amplitude,
            speed: self.options.speed,
            _pad: 0.0,
            color: self.options.color.to_rgba(),
            resolution: [w, h, w / h, 0.0],
            mouse: [self.pointer[0], self.pointer[1], 0.0, 0.0],
        }
    }
}
