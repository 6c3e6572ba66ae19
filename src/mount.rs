use crate::constants::{FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};
use crate::core::{BackdropConfig, ColorScheme, Intensity, NeuralScene, Viewport};
use crate::input::PointerState;
use crate::{dom, events, frame};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Default)]
struct MountState {
    alive: bool,
    canvas: Option<web::HtmlCanvasElement>,
    ctx: Option<Rc<RefCell<frame::FrameContext>>>,
    listeners: Option<events::Listeners>,
}

/// Animated neural-network background mounted into a host element.
///
/// Construct one per mount; to change the color scheme or intensity, dispose
/// it and construct a new one.
#[wasm_bindgen]
pub struct NeuralBackground {
    state: Rc<RefCell<MountState>>,
}

#[wasm_bindgen]
impl NeuralBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: web::HtmlElement,
        color_scheme: &str,
        intensity: Option<String>,
    ) -> NeuralBackground {
        let state = Rc::new(RefCell::new(MountState::default()));
        let color_scheme = color_scheme.parse::<ColorScheme>().unwrap_or_else(|e| {
            log::warn!("{}; using {}", e, ColorScheme::default());
            ColorScheme::default()
        });
        let intensity = intensity
            .as_deref()
            .map(|s| {
                s.parse::<Intensity>().unwrap_or_else(|e| {
                    log::warn!("{}; using {}", e, Intensity::default());
                    Intensity::default()
                })
            })
            .unwrap_or_default();
        if let Err(e) = mount(&state, &container, color_scheme, intensity) {
            log::warn!("neural background disabled: {:?}", e);
            teardown(&state);
        }
        NeuralBackground { state }
    }

    /// Stop the loop, remove listeners and release all GPU resources.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        teardown(&self.state);
    }
}

impl Drop for NeuralBackground {
    fn drop(&mut self) {
        teardown(&self.state);
    }
}

fn mount(
    state: &Rc<RefCell<MountState>>,
    container: &web::HtmlElement,
    color_scheme: ColorScheme,
    intensity: Intensity,
) -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let viewport = dom::viewport(&window)
        .or_else(|| Viewport::new(FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT, 1.0))
        .ok_or_else(|| anyhow::anyhow!("no usable viewport"))?;
    let config = BackdropConfig::new(
        color_scheme,
        intensity,
        dom::prefers_reduced_motion(&window),
    );
    log::info!(
        "[mount] scheme={} intensity={} reduced_motion={} points={} pulses={}",
        config.color_scheme,
        config.intensity,
        config.reduced_motion,
        config.point_count(),
        config.pulse_count()
    );

    let canvas = dom::create_backdrop_canvas(&document, container)?;
    dom::sync_canvas_backing_size(&canvas, &viewport);

    let pointer = Rc::new(RefCell::new(PointerState::default()));
    let pending_resize = Rc::new(RefCell::new(None::<Viewport>));
    let scene = NeuralScene::new(config, viewport, StdRng::from_entropy());
    let ctx = frame::FrameContext::new(
        &window,
        scene,
        canvas.clone(),
        pointer.clone(),
        pending_resize.clone(),
    );
    let listeners = events::Listeners::new(
        events::wire_pointermove(&window, pointer),
        events::wire_resize(&window, pending_resize),
    );

    {
        let mut st = state.borrow_mut();
        st.alive = true;
        st.canvas = Some(canvas.clone());
        st.ctx = Some(ctx.clone());
        st.listeners = Some(listeners);
    }

    let points = config.point_count();
    let extra_sprites = config.pulse_count() + 2;
    let state_gpu = state.clone();
    spawn_local(async move {
        let gpu = frame::init_gpu(&canvas, viewport, points, extra_sprites).await;
        if !state_gpu.borrow().alive {
            // Disposed while the adapter request was in flight.
            if let Some(mut g) = gpu {
                g.release();
            }
            return;
        }
        match gpu {
            Some(g) => {
                if ctx.borrow_mut().start(g) {
                    log::info!("[mount] render loop started");
                }
            }
            None => {
                log::warn!("neural background disabled: no rendering context");
                teardown(&state_gpu);
            }
        }
    });
    Ok(())
}

fn teardown(state: &Rc<RefCell<MountState>>) {
    let (ctx, listeners, canvas) = {
        let mut st = state.borrow_mut();
        st.alive = false;
        (st.ctx.take(), st.listeners.take(), st.canvas.take())
    };
    if let Some(ctx) = ctx {
        if let Ok(mut c) = ctx.try_borrow_mut() {
            c.dispose();
        }
    }
    drop(listeners);
    if let Some(canvas) = canvas {
        dom::detach(&canvas);
    }
}
