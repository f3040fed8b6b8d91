// Host-side tests for the instance lifecycle, driven through a counting backend.

use new2canada_fx::config::{Color, EffectConfig, HyperspeedOptions, IridescenceOptions};
use new2canada_fx::effect::{EffectScene, Frame, FrameUniforms};
use new2canada_fx::instance::{EffectInstance, FrameOutcome, RenderBackend, ResizeTracker};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct Probe {
    resizes: Vec<(u32, u32)>,
    renders: usize,
    draws: usize,
    instances: u32,
    colors: Vec<[f32; 4]>,
    releases: usize,
    fail_render: bool,
}

impl RenderBackend for Probe {
    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn render(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        self.renders += 1;
        self.draws += frame.draws.len();
        self.instances += frame.draws.iter().map(|d| d.instances).sum::<u32>();
        if let FrameUniforms::Iridescence(u) = frame.uniforms {
            self.colors.push(u.color);
        }
        if self.fail_render {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

fn scene(config: EffectConfig) -> EffectScene {
    EffectScene::build(config, &mut StdRng::seed_from_u64(11))
}

fn iridescence(color: Color) -> EffectInstance<Probe> {
    let options = IridescenceOptions {
        color,
        ..IridescenceOptions::default()
    };
    EffectInstance::new(
        scene(EffectConfig::Iridescence(options)),
        Probe::default(),
        800,
        600,
    )
}

fn hyperspeed(width: u32, height: u32) -> EffectInstance<Probe> {
    EffectInstance::new(
        scene(EffectConfig::Hyperspeed(HyperspeedOptions::default())),
        Probe::default(),
        width,
        height,
    )
}

fn camera_aspect(instance: &EffectInstance<Probe>) -> f32 {
    match instance.scene() {
        Some(EffectScene::Hyperspeed(s)) => s.camera().aspect,
        _ => panic!("not a live hyperspeed instance"),
    }
}

#[test]
fn double_dispose_releases_the_backend_once() {
    let mut instance = iridescence(Color::WHITE);
    assert!(instance.dispose());
    assert!(!instance.dispose());
    assert!(instance.is_disposed());
    assert_eq!(instance.backend().releases, 1);
}

#[test]
fn frames_after_dispose_touch_nothing() {
    let mut instance = hyperspeed(800, 600);
    assert_eq!(instance.frame(0.016), FrameOutcome::Rendered);
    instance.dispose();
    instance.observe_size(400, 300);
    instance.set_boost(true);
    instance.pointer_moved([0.1, 0.1]);
    assert_eq!(instance.frame(0.016), FrameOutcome::Disposed);
    assert_eq!(instance.frame(0.016), FrameOutcome::Disposed);
    let probe = instance.backend();
    assert_eq!(probe.renders, 1);
    assert!(probe.resizes.is_empty());
    assert_eq!(probe.releases, 1);
}

#[test]
fn resize_is_applied_once_per_real_change() {
    let mut instance = hyperspeed(800, 600);
    assert!((camera_aspect(&instance) - 800.0 / 600.0).abs() < 1e-6);

    instance.observe_size(400, 300);
    instance.observe_size(400, 300);
    instance.frame(0.016);
    instance.observe_size(400, 300);
    instance.frame(0.016);

    assert_eq!(instance.backend().resizes, vec![(400, 300)]);
    assert_eq!(instance.size(), (400, 300));
    assert!((camera_aspect(&instance) - 400.0 / 300.0).abs() < 1e-6);

    instance.observe_size(300, 400);
    instance.frame(0.016);
    assert_eq!(instance.backend().resizes, vec![(400, 300), (300, 400)]);
    assert!((camera_aspect(&instance) - 0.75).abs() < 1e-6);
}

#[test]
fn a_flicker_back_to_the_applied_size_is_not_a_resize() {
    let mut instance = hyperspeed(800, 600);
    instance.observe_size(400, 300);
    instance.observe_size(800, 600);
    instance.frame(0.016);
    assert!(instance.backend().resizes.is_empty());
}

#[test]
fn zero_sized_hosts_skip_frames_without_advancing() {
    let mut instance = iridescence(Color::WHITE);
    instance.observe_size(0, 300);
    assert_eq!(instance.frame(0.05), FrameOutcome::Skipped);
    assert_eq!(instance.backend().renders, 0);
    assert!(instance.backend().resizes.is_empty());

    instance.observe_size(640, 480);
    assert_eq!(instance.frame(0.05), FrameOutcome::Rendered);
    assert_eq!(instance.backend().resizes, vec![(640, 480)]);
    match instance.scene() {
        Some(EffectScene::Iridescence(s)) => assert!((s.time() - 0.05).abs() < 1e-6),
        _ => panic!("not a live iridescence instance"),
    }
}

#[test]
fn iridescence_draws_once_per_frame_in_the_declared_color() {
    let mut instance = iridescence(Color::rgb(1.0, 0.0, 0.0));
    for _ in 0..3 {
        assert_eq!(instance.frame(0.016), FrameOutcome::Rendered);
    }
    let probe = instance.backend();
    assert_eq!(probe.renders, 3);
    assert_eq!(probe.draws, 3);
    assert_eq!(probe.instances, 3);
    assert!(probe.colors.iter().all(|c| *c == [1.0, 0.0, 0.0, 1.0]));
}

#[test]
fn frame_delta_is_clamped() {
    let mut instance = iridescence(Color::WHITE);
    instance.frame(5.0);
    instance.frame(-1.0);
    instance.frame(f32::NAN);
    match instance.scene() {
        Some(EffectScene::Iridescence(s)) => assert!((s.time() - 0.1).abs() < 1e-6),
        _ => panic!("not a live iridescence instance"),
    }
}

#[test]
fn render_errors_do_not_stop_the_clock() {
    let mut failing = EffectInstance::new(
        scene(EffectConfig::Iridescence(IridescenceOptions::default())),
        Probe {
            fail_render: true,
            ..Probe::default()
        },
        100,
        100,
    );
    assert_eq!(failing.frame(0.05), FrameOutcome::Rendered);
    assert_eq!(failing.frame(0.05), FrameOutcome::Rendered);
    assert_eq!(failing.backend().renders, 2);
    match failing.scene() {
        Some(EffectScene::Iridescence(s)) => assert!((s.time() - 0.1).abs() < 1e-6),
        _ => panic!("not a live iridescence instance"),
    }
}

#[test]
fn boost_reaches_the_hyperspeed_easing() {
    let mut instance = hyperspeed(800, 600);
    instance.set_boost(true);
    instance.frame(0.016);
    match instance.scene() {
        Some(EffectScene::Hyperspeed(s)) => {
            assert!(s.easing().is_boosted());
            assert!(s.easing().speed_up > 0.0);
        }
        _ => panic!("not a live hyperspeed instance"),
    }
}

#[test]
fn tracker_ignores_empty_and_repeated_sizes() {
    let mut tracker = ResizeTracker::new(10, 10);
    assert_eq!(tracker.take_change(), None);
    tracker.observe(0, 0);
    assert!(!tracker.renderable());
    assert_eq!(tracker.take_change(), None);
    tracker.observe(20, 10);
    assert_eq!(tracker.take_change(), Some((20, 10)));
    assert_eq!(tracker.take_change(), None);
    assert_eq!(tracker.applied(), (20, 10));
}
