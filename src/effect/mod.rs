//! Per-instance simulation state for both effects.
//!
//! An [`EffectScene`] owns everything that changes frame to frame (clock,
//! easing, camera, pointer) and describes each frame as plain data for a
//! [`RenderBackend`](crate::instance::RenderBackend) to draw.

mod easing;
mod hyperspeed;
mod iridescence;
mod uniforms;

pub use easing::{approach, ease_alpha, EasingState};
pub use hyperspeed::HyperspeedState;
pub use iridescence::IridescenceState;
pub use uniforms::{IridescenceUniforms, ObjectUniforms, PostUniforms, SceneUniforms};

use crate::config::{Color, EffectConfig, EffectKind};
use crate::scene::DrawCall;
use rand::Rng;

/// How the drawn scene reaches the visible surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    /// One pass straight into the surface.
    Direct,
    /// Scene into an offscreen target, then bloom, then anti-aliasing; only
    /// the last pass writes the surface.
    BloomAntialias,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameUniforms {
    Iridescence(IridescenceUniforms),
    Scene(SceneUniforms),
}

/// Everything a backend needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub uniforms: FrameUniforms,
    pub draws: &'a [DrawCall],
    pub composite: Composite,
    pub clear: Color,
}

static FULLSCREEN_DRAWS: [DrawCall; 1] = [DrawCall::FULLSCREEN];

pub enum EffectScene {
    Iridescence(IridescenceState),
    Hyperspeed(Box<HyperspeedState>),
}

impl EffectScene {
    pub fn build<R: Rng + ?Sized>(config: EffectConfig, rng: &mut R) -> Self {
        match config {
            EffectConfig::Iridescence(o) => Self::Iridescence(IridescenceState::new(o)),
            EffectConfig::Hyperspeed(o) => Self::Hyperspeed(Box::new(HyperspeedState::new(o, rng))),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Iridescence(_) => EffectKind::Iridescence,
            Self::Hyperspeed(_) => EffectKind::Hyperspeed,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        match self {
            Self::Iridescence(s) => s.resize(width, height),
            Self::Hyperspeed(s) => s.resize(width, height),
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        match self {
            Self::Iridescence(s) => s.advance(dt_sec),
            Self::Hyperspeed(s) => s.advance(dt_sec),
        }
    }

    pub fn pointer_moved(&mut self, uv: [f32; 2]) {
        if let Self::Iridescence(s) = self {
            s.pointer_moved(uv);
        }
    }

    pub fn set_boost(&mut self, on: bool) {
        if let Self::Hyperspeed(s) = self {
            s.set_boost(on);
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        match self {
            Self::Iridescence(s) => Frame {
                uniforms: FrameUniforms::Iridescence(s.uniforms()),
                draws: &FULLSCREEN_DRAWS,
                composite: Composite::Direct,
                clear: Color::BLACK,
            },
            Self::Hyperspeed(s) => Frame {
                uniforms: FrameUniforms::Scene(s.uniforms()),
                draws: s.draws(),
                composite: Composite::BloomAntialias,
                clear: s.options().colors.background,
            },
        }
    }
}
