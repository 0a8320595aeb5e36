use intro_core::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn lookup_canvas(
    document: &web::Document,
    canvas_id: &str,
) -> Result<web::HtmlCanvasElement, JsValue> {
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{canvas_id}")))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))
}

/// Keep the canvas backing store at CSS size * devicePixelRatio (capped at
/// [`MAX_PIXEL_RATIO`]) so the render stays crisp on high-density displays
/// without paying for 3x panels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
