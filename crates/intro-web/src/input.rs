use intro_core::PointerInput;
use web_sys as web;

/// Normalized device pointer position: x right, y up, both in [-1, 1],
/// measured against the full window so the parallax tracks even when the
/// pointer leaves the canvas.
#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, window: &web::Window) -> PointerInput {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0);
    PointerInput {
        x: ((ev.client_x() as f64 / w) * 2.0 - 1.0) as f32,
        y: (-((ev.client_y() as f64 / h) * 2.0 - 1.0)) as f32,
    }
}
