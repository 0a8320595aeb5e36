//! Per-frame driver. One `FrameContext` owns everything the intro holds on
//! the page; the rAF callback lives in a shared holder so teardown can cancel
//! the pending frame and drop the closure without leaking it.

use crate::audio;
use crate::events::InputWiring;
use crate::overlay::Overlay;
use crate::render;
use intro_core::{Clock, IntroScene, ParticleInstance, PointerInput};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct RafLoop {
    pub callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pub pending: Rc<Cell<Option<i32>>>,
}

pub struct FrameContext {
    pub scene: IntroScene,
    pub clock: Clock,
    pub pointer: Rc<Cell<PointerInput>>,
    pub exit_clicked: Rc<Cell<bool>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub instances: Vec<ParticleInstance>,

    pub audio: Option<audio::CueVoice>,
    pub overlay: Overlay,
    pub wiring: Option<InputWiring>,
    pub raf: Option<RafLoop>,
    pub on_complete: Option<js_sys::Function>,
    pub done: bool,
}

impl FrameContext {
    /// One simulation + render step. Returns false once the exit fade has
    /// played out and the intro should tear down.
    pub fn frame(&mut self) -> bool {
        let (elapsed, dt) = self.clock.tick();

        if self.exit_clicked.take() {
            self.scene.request_exit(elapsed);
        }
        let events = self.scene.update(elapsed, dt, self.pointer.get());

        if events.start_audio {
            match audio::trigger_cue() {
                Ok(voice) => self.audio = Some(voice),
                Err(e) => log::warn!("audio cue unavailable: {:?}", e),
            }
        }

        self.overlay.apply(self.scene.overlay_flags());
        self.overlay.set_opacity(self.scene.overlay_opacity(elapsed));

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            self.scene.particle_instances(&mut self.instances);
            let view = self.scene.rig.view_matrix();
            let proj = self.scene.rig.projection_matrix(g.aspect());
            let model = self.scene.logo_transform();
            if let Err(e) = g.render(&self.instances, view, proj, model) {
                log::error!("render error: {:?}", e);
            }
        }

        !self.scene.finished(elapsed)
    }

    /// Release every page resource. Idempotent. Returns the rAF loop so the
    /// caller can decide when the (possibly still executing) closure gets
    /// dropped, plus the completion callback: the caller must invoke it
    /// after releasing its borrow, since the host may re-enter the handle
    /// synchronously from inside it.
    pub fn shutdown(&mut self) -> (Option<RafLoop>, Option<js_sys::Function>) {
        if self.done {
            return (None, None);
        }
        self.done = true;

        let raf = self.raf.take();
        if let Some(raf) = raf.as_ref() {
            if let (Some(w), Some(id)) = (web::window(), raf.pending.replace(None)) {
                let _ = w.cancel_animation_frame(id);
            }
        }
        if let Some(wiring) = self.wiring.take() {
            wiring.remove();
        }
        if let Some(voice) = self.audio.take() {
            voice.stop();
        }
        self.gpu = None;
        self.overlay.clear();
        log::info!("intro torn down");
        (raf, self.on_complete.take())
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    geometry: &intro_core::logo::LogoGeometry,
    instance_capacity: usize,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, geometry, instance_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Schedule the frame loop. The callback holder is stored both here and in
/// the context; teardown from inside a frame defers the closure drop to a
/// microtask so a closure never frees itself mid-call.
pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    ctx.borrow_mut().raf = Some(RafLoop {
        callback: callback.clone(),
        pending: pending.clone(),
    });

    let ctx_tick = ctx.clone();
    let callback_tick = callback.clone();
    let pending_tick = pending.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        let keep_going = ctx_tick.borrow_mut().frame();
        if keep_going {
            schedule(&callback_tick, &pending_tick);
        } else {
            let (raf, on_complete) = ctx_tick.borrow_mut().shutdown();
            if let Some(raf) = raf {
                spawn_local(async move {
                    raf.callback.borrow_mut().take();
                });
            }
            if let Some(cb) = on_complete {
                let _ = cb.call0(&JsValue::NULL);
            }
        }
    }) as Box<dyn FnMut()>));
    schedule(&callback, &pending);
}

fn schedule(
    callback: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: &Rc<Cell<Option<i32>>>,
) {
    if let (Some(w), Some(cb)) = (web::window(), callback.borrow().as_ref()) {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            pending.set(Some(id));
        }
    }
}

/// Teardown entered from outside the frame loop (handle call or skip). Safe
/// to call at any time, any number of times.
pub fn teardown(ctx: &Rc<RefCell<FrameContext>>) {
    let (raf, on_complete) = ctx.borrow_mut().shutdown();
    if let Some(raf) = raf {
        raf.callback.borrow_mut().take();
    }
    if let Some(cb) = on_complete {
        let _ = cb.call0(&JsValue::NULL);
    }
}

