//! Mount/tick/teardown state machine, independent of the browser.
//!
//! The loop is explicit: `start` schedules one frame, each frame runs
//! `tick` then schedules the next, and a liveness flag is checked before every
//! re-schedule. Once [`Backdrop::dispose`] has run, no frame is ever requested
//! again and the pending one is cancelled.

use super::camera::Viewport;
use super::scene::{NeuralScene, SceneFrame};
use glam::Vec2;
use rand::Rng;

/// Host "next frame" primitive (`requestAnimationFrame` on the web).
pub trait FrameScheduler {
    type Handle: Copy;

    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Drawing capability the scene is rendered through.
pub trait RenderBackend {
    fn resize(&mut self, viewport: Viewport);

    fn draw(&mut self, frame: &SceneFrame<'_>) -> anyhow::Result<()>;

    /// Free every GPU-side resource. Must be safe to call more than once.
    fn release(&mut self);
}

/// Pending-frame bookkeeping guarded by a liveness flag.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    alive: bool,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            alive: true,
        }
    }

    /// Request the next frame unless torn down or one is already pending.
    pub fn schedule(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        if self.pending.is_some() {
            return true;
        }
        self.pending = self.scheduler.request_frame();
        self.pending.is_some()
    }

    /// Called at the start of a frame callback; the pending request has fired.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.alive
    }

    pub fn teardown(&mut self) {
        self.alive = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A mounted background: scene, frame loop and (once ready) a render backend.
///
/// The backend is optional because GPU setup can complete after mounting, or
/// never; the simulation still runs and simply draws nothing.
pub struct Backdrop<S: FrameScheduler, B: RenderBackend, R: Rng> {
    scene: NeuralScene<R>,
    frames: FrameLoop<S>,
    backend: Option<B>,
    pending_viewport: Option<Viewport>,
    frame_errors: u32,
}

impl<S: FrameScheduler, B: RenderBackend, R: Rng> Backdrop<S, B, R> {
    pub fn new(scene: NeuralScene<R>, scheduler: S) -> Self {
        Self {
            scene,
            frames: FrameLoop::new(scheduler),
            backend: None,
            pending_viewport: None,
            frame_errors: 0,
        }
    }

    /// Install the backend. Rejected (and released) if already disposed.
    pub fn attach_backend(&mut self, mut backend: B) -> bool {
        if !self.frames.is_alive() {
            backend.release();
            return false;
        }
        if let Some(mut old) = self.backend.replace(backend) {
            old.release();
        }
        true
    }

    pub fn start(&mut self) -> bool {
        self.frames.schedule()
    }

    /// Run one frame: apply queued input, tick, draw, then re-schedule.
    pub fn run_frame(&mut self, elapsed_sec: f32) {
        if !self.frames.begin_frame() {
            return;
        }
        if let Some(viewport) = self.pending_viewport.take() {
            self.scene.set_viewport(viewport);
            if let Some(backend) = self.backend.as_mut() {
                backend.resize(viewport);
            }
        }
        self.scene.tick(elapsed_sec);
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.draw(&self.scene.frame()) {
                self.frame_errors += 1;
                log::error!("render error: {:?}", e);
            }
        }
        self.frames.schedule();
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.scene.set_pointer(pointer);
    }

    /// Queue a resize; applied at the start of the next frame.
    pub fn resized(&mut self, viewport: Viewport) {
        self.pending_viewport = Some(viewport);
    }

    /// Cancel the pending frame and release the backend. Idempotent.
    pub fn dispose(&mut self) {
        let was_alive = self.frames.is_alive();
        self.frames.teardown();
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
        if was_alive {
            log::info!("backdrop disposed after {} frames", self.scene.ticks());
        }
    }

    pub fn is_alive(&self) -> bool {
        self.frames.is_alive()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_pending()
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn frame_errors(&self) -> u32 {
        self.frame_errors
    }

    pub fn scene(&self) -> &NeuralScene<R> {
        &self.scene
    }
}

impl<S: FrameScheduler, B: RenderBackend, R: Rng> Drop for Backdrop<S, B, R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
