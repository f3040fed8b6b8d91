//! Animated page backgrounds rendered with WebGPU.
//!
//! Any element carrying `data-effect="iridescence"` or
//! `data-effect="hyperspeed"` gets a canvas drawn behind its content. The
//! simulation and configuration modules are plain Rust and build on any
//! target; the browser glue only exists on `wasm32`.

pub mod camera;
pub mod config;
pub mod constants;
pub mod distortion;
pub mod effect;
pub mod input;
pub mod instance;
pub mod programs;
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod mount;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::*;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::{dom, mount};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    fn on_window(kind: &str, f: impl FnMut() + 'static) {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("new2canada-fx starting");

        let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
        if document.ready_state() == web::DocumentReadyState::Loading {
            let doc = document.clone();
            let ready = Closure::once(move || mount::mount_all(&doc));
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                ready.as_ref().unchecked_ref(),
            )?;
            ready.forget();
        } else {
            mount::mount_all(&document);
        }

        on_window("pagehide", || {
            mount::dispose_all();
        });
        Ok(())
    }

    /// Tears down every running effect; returns how many were live.
    #[wasm_bindgen]
    pub fn dispose_all() -> u32 {
        mount::dispose_all() as u32
    }
}
