#![cfg(target_arch = "wasm32")]

//! Browser frontend for the hero intro. The page calls [`start_intro`] with
//! a canvas id and a completion callback; everything else (WebGPU surface,
//! WebAudio cue, overlay attributes, pointer listeners) is owned here and
//! released when the sequence finishes or the page asks for an early skip.

mod audio;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use intro_core::{Clock, IntroScene, PointerInput};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

// One intro per page load; a second start call is refused.
static STARTED: AtomicBool = AtomicBool::new(false);

/// Handle returned to JS. Dropping it does not stop the intro; the page
/// controls early exit through [`IntroHandle::skip`] or `teardown`.
#[wasm_bindgen]
pub struct IntroHandle {
    ctx: Rc<RefCell<frame::FrameContext>>,
}

#[wasm_bindgen]
impl IntroHandle {
    /// Gate the audio cue. Muting before the cue threshold latches it off
    /// for the whole run; muting after cuts the playing tone.
    pub fn set_muted(&self, muted: bool) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.scene.set_muted(muted);
        if muted {
            if let Some(voice) = ctx.audio.take() {
                voice.stop();
            }
        }
    }

    pub fn muted(&self) -> bool {
        self.ctx.borrow().scene.muted()
    }

    /// Begin the exit fade now, as if the user clicked through.
    pub fn skip(&self) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.exit_clicked.set(true);
        // If the loop never started (init failure) there is no frame to
        // consume the flag, so fall through to a direct teardown.
        if ctx.raf.is_none() {
            drop(ctx);
            frame::teardown(&self.ctx);
        }
    }

    pub fn text_visible(&self) -> bool {
        self.ctx.borrow().scene.overlay_flags().text_visible
    }

    pub fn button_visible(&self) -> bool {
        self.ctx.borrow().scene.overlay_flags().button_visible
    }

    /// Release everything immediately, skipping the fade. Idempotent.
    pub fn teardown(&self) {
        frame::teardown(&self.ctx);
    }
}

/// Entry point: wire the intro to `#canvas_id` and run it to completion.
/// `on_complete` fires exactly once, either after the exit fade or right
/// away if the render surface cannot be created.
#[wasm_bindgen]
pub async fn start_intro(
    canvas_id: String,
    on_complete: js_sys::Function,
) -> Result<IntroHandle, JsValue> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Err(JsValue::from_str("intro already started"));
    }
    let (window, document) = dom::window_document()
        .ok_or_else(|| JsValue::from_str("no window/document"))?;
    let canvas = dom::lookup_canvas(&document, &canvas_id)?;
    dom::sync_canvas_backing_size(&canvas);

    let seed = js_sys::Date::now() as u64;
    let scene = IntroScene::new(seed);
    let capacity = scene.particle_capacity();

    let pointer = Rc::new(Cell::new(PointerInput::default()));
    let exit_clicked = Rc::new(Cell::new(false));
    let wiring =
        events::wire_input_handlers(&window, &canvas, pointer.clone(), exit_clicked.clone())?;

    let gpu = frame::init_gpu(&canvas, &scene.geometry, capacity).await;
    let gpu_ok = gpu.is_some();

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        clock: Clock::new(),
        pointer,
        exit_clicked,
        canvas,
        gpu,
        instances: Vec::with_capacity(capacity),
        audio: None,
        overlay: overlay::Overlay::new(&document),
        wiring: Some(wiring),
        raf: None,
        on_complete: Some(on_complete),
        done: false,
    }));

    if gpu_ok {
        log::info!("intro started (seed {seed})");
        frame::start_loop(ctx.clone());
    } else {
        // No surface: complete immediately so the page can fall back
        frame::teardown(&ctx);
    }
    Ok(IntroHandle { ctx })
}
