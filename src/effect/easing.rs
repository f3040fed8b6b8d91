use crate::constants::{EASE_RATE_PER_SEC, FOV_SNAP, SPEED_UP_SNAP};

/// Fraction of the remaining gap covered in a step of `dt_sec`.
#[inline]
pub fn ease_alpha(dt_sec: f32) -> f32 {
    1.0 - (-EASE_RATE_PER_SEC * dt_sec).exp()
}

/// One exponential step from `current` toward `target`; lands exactly on the
/// target once the step would be smaller than `snap`.
#[inline]
pub fn approach(current: f32, target: f32, alpha: f32, snap: f32) -> f32 {
    let change = (target - current) * alpha.clamp(0.0, 1.0);
    if change.abs() < snap {
        target
    } else {
        current + change
    }
}

/// Field of view and speed-up, each eased toward a target that flips between
/// its baseline and boosted value on press / release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasingState {
    pub fov: f32,
    pub fov_target: f32,
    pub speed_up: f32,
    pub speed_up_target: f32,
    /// extra effect time accumulated while sped up
    pub time_offset: f32,
    base_fov: f32,
    boosted_fov: f32,
    boost_speed_up: f32,
}

impl EasingState {
    pub fn new(base_fov: f32, boosted_fov: f32, boost_speed_up: f32) -> Self {
        Self {
            fov: base_fov,
            fov_target: base_fov,
            speed_up: 0.0,
            speed_up_target: 0.0,
            time_offset: 0.0,
            base_fov,
            boosted_fov,
            boost_speed_up,
        }
    }

    pub fn press(&mut self) {
        self.fov_target = self.boosted_fov;
        self.speed_up_target = self.boost_speed_up;
    }

    pub fn release(&mut self) {
        self.fov_target = self.base_fov;
        self.speed_up_target = 0.0;
    }

    pub fn is_boosted(&self) -> bool {
        self.speed_up_target > 0.0
    }

    /// Returns true when the field of view changed (projection is stale).
    pub fn step(&mut self, dt_sec: f32) -> bool {
        if dt_sec <= 0.0 {
            return false;
        }
        let alpha = ease_alpha(dt_sec);
        self.speed_up = approach(self.speed_up, self.speed_up_target, alpha, SPEED_UP_SNAP);
        self.time_offset += self.speed_up * dt_sec;

        let fov = approach(self.fov, self.fov_target, alpha, FOV_SNAP);
        let changed = fov != self.fov;
        self.fov = fov;
        changed
    }
}
