use crate::core::{Backdrop, FrameScheduler, NeuralScene, Viewport};
use crate::dom;
use crate::input::PointerState;
use crate::render;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebBackdrop = Backdrop<RafScheduler, render::GpuState<'static>, StdRng>;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` behind [`FrameScheduler`].
pub struct RafScheduler {
    window: web::Window,
    tick: TickSlot,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.tick.borrow();
        let cb = slot.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

pub struct FrameContext {
    pub backdrop: WebBackdrop,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    pub pending_resize: Rc<RefCell<Option<Viewport>>>,
    started: Instant,
}

impl FrameContext {
    /// Build the context and its frame callback. The callback only holds a
    /// weak reference, so dropping the returned context ends the loop.
    pub fn new(
        window: &web::Window,
        scene: NeuralScene<StdRng>,
        canvas: web::HtmlCanvasElement,
        pointer: Rc<RefCell<PointerState>>,
        pending_resize: Rc<RefCell<Option<Viewport>>>,
    ) -> Rc<RefCell<Self>> {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            tick: tick.clone(),
        };
        let ctx = Rc::new(RefCell::new(Self {
            backdrop: Backdrop::new(scene, scheduler),
            canvas,
            pointer,
            pending_resize,
            started: Instant::now(),
        }));
        let weak: Weak<RefCell<Self>> = Rc::downgrade(&ctx);
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(ctx) = weak.upgrade() {
                if let Ok(mut c) = ctx.try_borrow_mut() {
                    c.frame();
                }
            }
        }) as Box<dyn FnMut()>));
        ctx
    }

    pub fn frame(&mut self) {
        if let Some(ndc) = self.pointer.borrow_mut().take() {
            self.backdrop.pointer_moved(ndc);
        }
        if let Some(viewport) = self.pending_resize.borrow_mut().take() {
            dom::sync_canvas_backing_size(&self.canvas, &viewport);
            self.backdrop.resized(viewport);
        }
        let elapsed = self.started.elapsed().as_secs_f32();
        self.backdrop.run_frame(elapsed);
    }

    /// Attach the GPU backend and schedule the first frame.
    pub fn start(&mut self, gpu: render::GpuState<'static>) -> bool {
        if !self.backdrop.attach_backend(gpu) {
            return false;
        }
        self.started = Instant::now();
        self.backdrop.start()
    }

    pub fn dispose(&mut self) {
        self.backdrop.dispose();
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    viewport: Viewport,
    points: usize,
    extra_sprites: usize,
) -> Option<render::GpuState<'static>> {
    let instance = wgpu::Instance::default();
    let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("WebGPU surface unavailable: {:?}", e);
            return None;
        }
    };
    match render::GpuState::new(
        &instance,
        surface,
        viewport.physical_size(),
        points,
        extra_sprites,
    )
    .await
    {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("WebGPU init error: {:?}", e);
            None
        }
    }
}
