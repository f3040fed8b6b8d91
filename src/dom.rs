use crate::config::{AttributeSource, EFFECT_ATTR};
use crate::constants::MAX_PIXEL_RATIO;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Host element attributes as an [`AttributeSource`].
pub struct ElementAttributes<'a>(pub &'a web::Element);

impl AttributeSource for ElementAttributes<'_> {
    fn attribute(&self, key: &str) -> Option<String> {
        self.0.get_attribute(key)
    }
}

/// Every element declaring `data-effect`, in document order.
pub fn effect_hosts(document: &web::Document) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(&format!("[{EFFECT_ATTR}]")) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Detached canvas that fills its host and lets pointer events through.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    canvas
        .set_attribute("style", input::CANVAS_STYLE)
        .map_err(|e| anyhow::anyhow!("style canvas: {:?}", e))?;
    canvas
        .set_attribute("aria-hidden", "true")
        .map_err(|e| anyhow::anyhow!("label canvas: {:?}", e))?;
    Ok(canvas)
}

/// Gives a statically positioned host a containing block for the canvas and
/// isolates its stacking context so the canvas paints under its children.
pub fn prepare_host(host: &web::HtmlElement) {
    let computed = web::window()
        .and_then(|w| w.get_computed_style(host).ok().flatten())
        .and_then(|s| s.get_property_value("position").ok())
        .unwrap_or_default();
    let style = host.style();
    if input::needs_containing_block(&computed) {
        let _ = style.set_property("position", "relative");
    }
    let _ = style.set_property("isolation", "isolate");
}

/// Attaches the canvas ahead of the host's existing children.
pub fn attach_canvas(
    host: &web::HtmlElement,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    host.insert_before(canvas, host.first_child().as_ref())
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("attach canvas: {:?}", e))
}

/// Host CSS size in backing-store pixels.
pub fn host_backing_size(host: &web::Element) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = host.get_bounding_client_rect();
    input::backing_size(rect.width(), rect.height(), dpr, MAX_PIXEL_RATIO)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
}
