//! One running effect on one host: clock, resize bookkeeping, disposal.
//!
//! Nothing here touches the browser; the GPU side sits behind
//! [`RenderBackend`] so lifecycle rules are checked host-side.

use crate::constants::MAX_FRAME_DT_SEC;
use crate::effect::{EffectScene, Frame};

/// The drawing half of an effect instance.
pub trait RenderBackend {
    /// Backing store and offscreen targets now have this pixel size.
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;

    /// Free every GPU resource. Called at most once.
    fn release(&mut self);
}

/// Collapses a stream of observed sizes into distinct changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeTracker {
    applied: (u32, u32),
    observed: (u32, u32),
}

impl ResizeTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            applied: (width, height),
            observed: (width, height),
        }
    }

    pub fn observe(&mut self, width: u32, height: u32) {
        self.observed = (width, height);
    }

    /// The pending size if it differs from the applied one and is not empty.
    pub fn take_change(&mut self) -> Option<(u32, u32)> {
        let (w, h) = self.observed;
        if w == 0 || h == 0 || self.observed == self.applied {
            return None;
        }
        self.applied = self.observed;
        Some(self.observed)
    }

    pub fn applied(&self) -> (u32, u32) {
        self.applied
    }

    pub fn renderable(&self) -> bool {
        let (w, h) = self.observed;
        w > 0 && h > 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// Host has no area; nothing drawn, clock held.
    Skipped,
    Disposed,
}

pub struct EffectInstance<B: RenderBackend> {
    scene: Option<EffectScene>,
    backend: B,
    tracker: ResizeTracker,
}

impl<B: RenderBackend> EffectInstance<B> {
    /// `backend` must already be sized to `width` x `height`.
    pub fn new(mut scene: EffectScene, backend: B, width: u32, height: u32) -> Self {
        scene.resize(width, height);
        Self {
            scene: Some(scene),
            backend,
            tracker: ResizeTracker::new(width, height),
        }
    }

    pub fn scene(&self) -> Option<&EffectScene> {
        self.scene.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn size(&self) -> (u32, u32) {
        self.tracker.applied()
    }

    pub fn is_disposed(&self) -> bool {
        self.scene.is_none()
    }

    pub fn observe_size(&mut self, width: u32, height: u32) {
        self.tracker.observe(width, height);
    }

    pub fn pointer_moved(&mut self, uv: [f32; 2]) {
        if let Some(scene) = self.scene.as_mut() {
            scene.pointer_moved(uv);
        }
    }

    pub fn set_boost(&mut self, on: bool) {
        if let Some(scene) = self.scene.as_mut() {
            scene.set_boost(on);
        }
    }

    /// Pending resize, then draw, then advance by `dt_sec` (clamped).
    pub fn frame(&mut self, dt_sec: f32) -> FrameOutcome {
        let Some(scene) = self.scene.as_mut() else {
            return FrameOutcome::Disposed;
        };
        if let Some((w, h)) = self.tracker.take_change() {
            log::debug!("[instance] resize to {w}x{h}");
            scene.resize(w, h);
            self.backend.resize(w, h);
        }
        if !self.tracker.renderable() {
            return FrameOutcome::Skipped;
        }
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        if let Err(e) = self.backend.render(&scene.frame()) {
            log::error!("render error: {:?}", e);
        }
        scene.advance(dt);
        FrameOutcome::Rendered
    }

    /// Releases the backend and drops the scene. Returns false when the
    /// instance was already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.scene.take().is_none() {
            return false;
        }
        self.backend.release();
        true
    }
}
