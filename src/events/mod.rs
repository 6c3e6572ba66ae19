pub mod pointer;
pub mod resize;

pub use pointer::wire_pointermove;
pub use resize::wire_resize;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener, removed from its target when dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("[events] could not add {} listener: {:?}", kind, e);
                None
            }
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Both window listeners owned by one mounted background.
pub struct Listeners {
    _pointer: Option<EventListener>,
    _resize: Option<EventListener>,
}

impl Listeners {
    pub fn new(pointer: Option<EventListener>, resize: Option<EventListener>) -> Self {
        Self {
            _pointer: pointer,
            _resize: resize,
        }
    }
}
