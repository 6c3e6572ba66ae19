use super::EventListener;
use crate::constants::RESIZE_EVENT;
use crate::core::Viewport;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Queue the new viewport for the next frame; the scene itself is untouched.
pub fn wire_resize(
    window: &web::Window,
    pending: Rc<RefCell<Option<Viewport>>>,
) -> Option<EventListener> {
    let wnd = window.clone();
    EventListener::new(window, RESIZE_EVENT, move |_ev: web::Event| {
        let Some(viewport) = dom::viewport(&wnd) else {
            return;
        };
        if let Ok(mut slot) = pending.try_borrow_mut() {
            *slot = Some(viewport);
        }
    })
}
