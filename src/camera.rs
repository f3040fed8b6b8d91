use glam::{Mat4, Vec3};

/// Right-handed perspective camera with a vertical field of view in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, position: Vec3, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect: 1.0,
            near,
            far,
            position,
            target: position + Vec3::NEG_Z,
        }
    }

    /// Zero-height viewports keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
