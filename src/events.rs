use crate::input;
use crate::instance::EffectInstance;
use crate::render::WgpuBackend;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type InstanceRef = Weak<RefCell<EffectInstance<WgpuBackend>>>;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

/// Listeners owned by one mounted effect; removed together on `clear` or drop.
#[derive(Default)]
pub struct Listeners {
    items: SmallVec<[Listener; 8]>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("[events] could not listen for `{kind}`");
            return;
        }
        self.items.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        for l in self.items.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.clear();
    }
}

fn with_instance(instance: &InstanceRef, f: impl FnOnce(&mut EffectInstance<WgpuBackend>)) {
    if let Some(rc) = instance.upgrade() {
        if let Ok(mut inst) = rc.try_borrow_mut() {
            f(&mut inst);
        }
    }
}

/// Pointer position over the host feeds the pattern offset.
pub fn wire_iridescence(listeners: &mut Listeners, host: &web::HtmlElement, instance: InstanceRef) {
    let target = host.clone();
    listeners.add(host, "pointermove", move |ev| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let rect = target.get_bounding_client_rect();
        if let Some(uv) = input::normalized_pointer(
            mouse.client_x() as f64,
            mouse.client_y() as f64,
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
        ) {
            with_instance(&instance, |inst| inst.pointer_moved(uv));
        }
    });
}

/// Press and hold to speed up; release to ease back.
pub fn wire_hyperspeed(listeners: &mut Listeners, host: &web::HtmlElement, instance: InstanceRef) {
    for kind in ["mousedown", "touchstart"] {
        let instance = instance.clone();
        listeners.add(host, kind, move |_| {
            with_instance(&instance, |inst| inst.set_boost(true));
        });
    }
    for kind in ["mouseup", "mouseout", "touchend", "touchcancel"] {
        let instance = instance.clone();
        listeners.add(host, kind, move |_| {
            with_instance(&instance, |inst| inst.set_boost(false));
        });
    }
    listeners.add(host, "contextmenu", |ev| ev.prevent_default());
}

/// Window resizes can change the pixel ratio without changing the host box.
pub fn wire_window_resize(listeners: &mut Listeners, host: &web::HtmlElement, instance: InstanceRef) {
    let Some(window) = web::window() else {
        return;
    };
    let target = host.clone();
    listeners.add(&window, "resize", move |_| {
        let (w, h) = crate::dom::host_backing_size(&target);
        with_instance(&instance, |inst| inst.observe_size(w, h));
    });
}
