//! Host discovery, per-host instance registry and teardown.

use crate::config::{EffectConfig, EffectKind};
use crate::dom::{self, ElementAttributes};
use crate::effect::EffectScene;
use crate::events::{self, Listeners};
use crate::frame::FrameLoop;
use crate::instance::{EffectInstance, FrameOutcome, RenderBackend};
use crate::render::WgpuBackend;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array)>;

struct MountedEffect {
    host: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    instance: Rc<RefCell<EffectInstance<WgpuBackend>>>,
    listeners: Listeners,
    observer: Option<(web::ResizeObserver, ObserverCallback)>,
    frames: Option<FrameLoop>,
}

impl MountedEffect {
    /// Frame loop, listeners, observer, GPU, canvas; each step is a no-op the
    /// second time.
    fn dispose(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        self.listeners.clear();
        if let Some((observer, _closure)) = self.observer.take() {
            observer.disconnect();
        }
        if let Ok(mut inst) = self.instance.try_borrow_mut() {
            inst.dispose();
        }
        self.canvas.remove();
    }
}

thread_local! {
    static MOUNTED: RefCell<Vec<MountedEffect>> = const { RefCell::new(Vec::new()) };
    // hosts whose GPU setup is still in flight
    static PENDING: RefCell<Vec<web::HtmlElement>> = const { RefCell::new(Vec::new()) };
}

fn is_known(host: &web::HtmlElement) -> bool {
    let same = |h: &web::HtmlElement| h == host;
    MOUNTED.with(|m| m.borrow().iter().any(|e| same(&e.host)))
        || PENDING.with(|p| p.borrow().iter().any(same))
}

fn take_pending(host: &web::HtmlElement) -> bool {
    PENDING.with(|p| {
        let mut p = p.borrow_mut();
        let before = p.len();
        p.retain(|h| h != host);
        p.len() != before
    })
}

/// Mounts every unmounted `[data-effect]` host in `document`.
pub fn mount_all(document: &web::Document) {
    let hosts = dom::effect_hosts(document);
    log::info!("[mount] found {} effect host(s)", hosts.len());
    for host in hosts {
        if is_known(&host) {
            continue;
        }
        let Some(config) = EffectConfig::resolve(&ElementAttributes(&host)) else {
            continue;
        };
        PENDING.with(|p| p.borrow_mut().push(host.clone()));
        spawn_local(async move {
            let kind = config.kind();
            if let Err(e) = mount(host.clone(), config).await {
                take_pending(&host);
                log::error!("[mount] {} unavailable: {:?}", kind.name(), e);
            }
        });
    }
}

async fn mount(host: web::HtmlElement, config: EffectConfig) -> anyhow::Result<()> {
    let document = host
        .owner_document()
        .ok_or_else(|| anyhow::anyhow!("host has no document"))?;
    let (width, height) = dom::host_backing_size(&host);
    let kind = config.kind();
    let wants_pointer = config.wants_pointer();

    let mut rng = StdRng::from_entropy();
    let scene = EffectScene::build(config, &mut rng);
    let canvas = dom::create_canvas(&document)?;
    let mut backend = WgpuBackend::new(&canvas, &scene, width, height).await?;

    if !take_pending(&host) || !host.is_connected() {
        // disposed or detached while the GPU was coming up
        backend.release();
        return Ok(());
    }
    dom::prepare_host(&host);
    dom::attach_canvas(&host, &canvas)?;

    let instance = Rc::new(RefCell::new(EffectInstance::new(
        scene, backend, width, height,
    )));
    let weak = Rc::downgrade(&instance);

    let mut listeners = Listeners::default();
    match kind {
        EffectKind::Iridescence if wants_pointer => {
            events::wire_iridescence(&mut listeners, &host, weak.clone())
        }
        EffectKind::Iridescence => {}
        EffectKind::Hyperspeed => events::wire_hyperspeed(&mut listeners, &host, weak.clone()),
    }
    events::wire_window_resize(&mut listeners, &host, weak.clone());

    let observer = observe_host(&host, weak.clone());

    let frame_host = host.clone();
    let frame_instance = weak;
    let frames = FrameLoop::start(move |dt| {
        if !frame_host.is_connected() {
            log::info!("[mount] host detached; disposing");
            unmount(&frame_host);
            return false;
        }
        let Some(rc) = frame_instance.upgrade() else {
            return false;
        };
        let outcome = rc.borrow_mut().frame(dt);
        outcome != FrameOutcome::Disposed
    });

    log::info!(
        "[mount] {} running at {}x{} ({} listeners)",
        kind.name(),
        width,
        height,
        listeners.len()
    );
    MOUNTED.with(|m| {
        m.borrow_mut().push(MountedEffect {
            host,
            canvas,
            instance,
            listeners,
            observer,
            frames: Some(frames),
        })
    });
    Ok(())
}

fn observe_host(
    host: &web::HtmlElement,
    instance: events::InstanceRef,
) -> Option<(web::ResizeObserver, ObserverCallback)> {
    let target = host.clone();
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        if entries.length() == 0 {
            return;
        }
        let (w, h) = dom::host_backing_size(&target);
        if let Some(rc) = instance.upgrade() {
            if let Ok(mut inst) = rc.try_borrow_mut() {
                inst.observe_size(w, h);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);
    match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(host);
            Some((observer, closure))
        }
        Err(e) => {
            log::warn!("[mount] ResizeObserver unavailable ({:?}); window resize only", e);
            None
        }
    }
}

/// Disposes the instance mounted on `host`, if any.
pub fn unmount(host: &web::HtmlElement) -> bool {
    let removed = MOUNTED.with(|m| {
        let mut m = m.borrow_mut();
        m.iter()
            .position(|e| &e.host == host)
            .map(|i| m.swap_remove(i))
    });
    let was_pending = take_pending(host);
    match removed {
        Some(mut effect) => {
            effect.dispose();
            true
        }
        None => was_pending,
    }
}

/// Disposes every mounted and pending instance; returns how many were live.
pub fn dispose_all() -> usize {
    let all = MOUNTED.with(|m| std::mem::take(&mut *m.borrow_mut()));
    let pending = PENDING.with(|p| std::mem::take(&mut *p.borrow_mut())).len();
    let count = all.len();
    for mut effect in all {
        effect.dispose();
    }
    if count + pending > 0 {
        log::info!("[mount] disposed {count} instance(s), cancelled {pending} pending");
    }
    count
}
