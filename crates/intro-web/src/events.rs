//! DOM event wiring. Every closure is stored here (never forgotten) so the
//! listeners can be removed again when the intro tears down.

use crate::dom;
use crate::input;
use intro_core::PointerInput;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct InputWiring {
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    pointer_move: Closure<dyn FnMut(web::PointerEvent)>,
    click: Closure<dyn FnMut(web::MouseEvent)>,
    resize: Closure<dyn FnMut()>,
}

pub fn wire_input_handlers(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    pointer: Rc<Cell<PointerInput>>,
    exit_clicked: Rc<Cell<bool>>,
) -> Result<InputWiring, JsValue> {
    let win_for_move = window.clone();
    let pointer_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        pointer.set(input::pointer_ndc(&ev, &win_for_move));
    }) as Box<dyn FnMut(web::PointerEvent)>);
    window
        .add_event_listener_with_callback("pointermove", pointer_move.as_ref().unchecked_ref())?;

    let click = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        exit_clicked.set(true);
    }) as Box<dyn FnMut(web::MouseEvent)>);
    canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

    let canvas_resize = canvas.clone();
    let resize = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

    Ok(InputWiring {
        window: window.clone(),
        canvas: canvas.clone(),
        pointer_move,
        click,
        resize,
    })
}

impl InputWiring {
    /// Unhook every listener. Consumes the wiring, which drops the closures
    /// once the browser can no longer call them.
    pub fn remove(self) {
        let _ = self.window.remove_event_listener_with_callback(
            "pointermove",
            self.pointer_move.as_ref().unchecked_ref(),
        );
        let _ = self
            .canvas
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}
