// Pointer and layout helpers shared by the DOM glue.

/// Inline style for the effect canvas: fills the host and sits under its
/// content inside the host's own stacking context.
pub const CANVAS_STYLE: &str = "position:absolute;inset:0;z-index:-1;width:100%;height:100%;\
display:block;pointer-events:none;";

/// Only a statically positioned host lacks a containing block for the canvas.
/// An unknown computed value leaves the host alone.
#[inline]
pub fn needs_containing_block(computed_position: &str) -> bool {
    computed_position.trim().eq_ignore_ascii_case("static")
}

/// Client coordinates to `[0, 1]^2` over a host rect, y pointing up.
/// `None` for an empty rect.
#[inline]
pub fn normalized_pointer(
    client_x: f64,
    client_y: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Option<[f32; 2]> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let u = ((client_x - left) / width).clamp(0.0, 1.0) as f32;
    let v = ((client_y - top) / height).clamp(0.0, 1.0) as f32;
    Some([u, 1.0 - v])
}

/// CSS size times the device pixel ratio (capped), in whole backing pixels.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, max_dpr: f64) -> (u32, u32) {
    let ratio = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_dpr)
    } else {
        1.0
    };
    let px = |css: f64| (css.max(0.0) * ratio).floor() as u32;
    (px(css_width), px(css_height))
}
