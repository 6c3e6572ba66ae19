use super::EventListener;
use crate::constants::POINTER_MOVE_EVENT;
use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Record the normalized pointer on every move. The sample is only read by
/// the next frame; anything unreadable is dropped.
pub fn wire_pointermove(
    window: &web::Window,
    pointer: Rc<RefCell<PointerState>>,
) -> Option<EventListener> {
    let wnd = window.clone();
    EventListener::new(window, POINTER_MOVE_EVENT, move |ev: web::Event| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let width = wnd.inner_width().ok().and_then(|v| v.as_f64());
        let height = wnd.inner_height().ok().and_then(|v| v.as_f64());
        let (Some(width), Some(height)) = (width, height) else {
            return;
        };
        let Some(ndc) =
            input::normalize_pointer(mouse.client_x() as f64, mouse.client_y() as f64, width, height)
        else {
            return;
        };
        if let Ok(mut ps) = pointer.try_borrow_mut() {
            ps.record(ndc);
        }
    })
}
