use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A self-rescheduling `requestAnimationFrame` loop owned by one instance.
///
/// `cancel` sets a flag read at the top of the next callback and cancels the
/// pending request; the loop never reschedules after that.
pub struct FrameLoop {
    cancelled: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

fn schedule(tick: &Tick, pending: &Cell<Option<i32>>) {
    let Some(window) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

impl FrameLoop {
    /// Calls `on_frame(dt_sec)` once per animation frame until it returns
    /// false or the loop is cancelled.
    pub fn start(mut on_frame: impl FnMut(f32) -> bool + 'static) -> Self {
        let cancelled = Rc::new(Cell::new(false));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Tick = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let cancelled_tick = cancelled.clone();
        let pending_tick = pending.clone();
        let mut last = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if cancelled_tick.get() {
                return;
            }
            let now = Instant::now();
            let dt = (now - last).as_secs_f32();
            last = now;
            if !on_frame(dt) {
                cancelled_tick.set(true);
            }
            if !cancelled_tick.get() {
                schedule(&tick_clone, &pending_tick);
            }
        }) as Box<dyn FnMut()>));

        schedule(&tick, &pending);
        Self {
            cancelled,
            pending,
            tick,
        }
    }

    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let (Some(id), Some(window)) = (self.pending.take(), web::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // the callback may be on the stack right now; free it once it returns
        let tick = self.tick.borrow_mut().take();
        wasm_bindgen_futures::spawn_local(async move {
            drop(tick);
        });
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
