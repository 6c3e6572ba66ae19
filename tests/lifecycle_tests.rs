// Host-side tests for the mount/tick/teardown state machine, driven by a
// manual frame scheduler instead of requestAnimationFrame.

use neural_backdrop::core::{
    Backdrop, BackdropConfig, ColorScheme, FrameLoop, FrameScheduler, Intensity, NeuralScene,
    RenderBackend, SceneFrame, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default, Debug)]
struct SchedulerLog {
    next_handle: u32,
    outstanding: Vec<u32>,
    requested: u32,
    cancelled: u32,
}

#[derive(Clone, Default)]
struct ManualScheduler {
    log: Rc<RefCell<SchedulerLog>>,
    refuse: bool,
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        if self.refuse {
            return None;
        }
        let mut log = self.log.borrow_mut();
        log.next_handle += 1;
        let h = log.next_handle;
        log.outstanding.push(h);
        log.requested += 1;
        Some(h)
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut log = self.log.borrow_mut();
        log.outstanding.retain(|&h| h != handle);
        log.cancelled += 1;
    }
}

impl ManualScheduler {
    /// Fire the oldest outstanding callback, as the browser would.
    fn fire(&self) -> bool {
        let mut log = self.log.borrow_mut();
        if log.outstanding.is_empty() {
            return false;
        }
        log.outstanding.remove(0);
        true
    }

    fn outstanding(&self) -> usize {
        self.log.borrow().outstanding.len()
    }
}

#[derive(Default, Debug)]
struct BackendLog {
    draws: u32,
    resizes: Vec<Viewport>,
    releases: u32,
    last_edge_vertices: usize,
    last_pulse_count: usize,
}

#[derive(Clone, Default)]
struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
    fail: bool,
}

impl RenderBackend for RecordingBackend {
    fn resize(&mut self, viewport: Viewport) {
        self.log.borrow_mut().resizes.push(viewport);
    }

    fn draw(&mut self, frame: &SceneFrame<'_>) -> anyhow::Result<()> {
        let mut log = self.log.borrow_mut();
        log.draws += 1;
        log.last_edge_vertices = frame.lines.vertices.len();
        log.last_pulse_count = frame.pulses.positions.len();
        if self.fail {
            anyhow::bail!("device lost");
        }
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

type TestBackdrop = Backdrop<ManualScheduler, RecordingBackend, StdRng>;

fn viewport() -> Viewport {
    Viewport::new(1024.0, 768.0, 1.0).unwrap()
}

fn backdrop(scheduler: ManualScheduler) -> TestBackdrop {
    let cfg = BackdropConfig::new(ColorScheme::Dark, Intensity::Normal, false);
    let scene = NeuralScene::new(cfg, viewport(), StdRng::seed_from_u64(99));
    Backdrop::new(scene, scheduler)
}

/// Fire one pending callback and run the frame it stands for.
fn pump(sched: &ManualScheduler, b: &mut TestBackdrop, frame: u32) -> bool {
    if !sched.fire() {
        return false;
    }
    b.run_frame(frame as f32 / 60.0);
    true
}

#[test]
fn frame_loop_keeps_exactly_one_request_in_flight() {
    let sched = ManualScheduler::default();
    let mut fl = FrameLoop::new(sched.clone());
    assert!(fl.schedule());
    assert!(fl.schedule());
    assert_eq!(sched.outstanding(), 1);
    assert!(fl.has_pending());
    assert!(sched.fire());
    assert!(fl.begin_frame());
    assert!(!fl.has_pending());
    assert!(fl.schedule());
    assert_eq!(sched.log.borrow().requested, 2);
}

#[test]
fn teardown_cancels_and_blocks_rescheduling() {
    let sched = ManualScheduler::default();
    let mut fl = FrameLoop::new(sched.clone());
    fl.schedule();
    fl.teardown();
    assert_eq!(sched.outstanding(), 0);
    assert!(!fl.is_alive());
    assert!(!fl.schedule());
    assert!(!fl.begin_frame());
    assert_eq!(sched.log.borrow().requested, 1);
}

#[test]
fn refused_request_leaves_nothing_pending() {
    let sched = ManualScheduler {
        refuse: true,
        ..Default::default()
    };
    let mut fl = FrameLoop::new(sched);
    assert!(!fl.schedule());
    assert!(!fl.has_pending());
}

#[test]
fn each_frame_ticks_draws_and_reschedules() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend::default();
    let mut b = backdrop(sched.clone());
    assert!(b.attach_backend(backend.clone()));
    assert!(b.start());
    for frame in 0..30 {
        assert!(pump(&sched, &mut b, frame));
        assert_eq!(sched.outstanding(), 1);
    }
    assert_eq!(b.scene().ticks(), 30);
    let log = backend.log.borrow();
    assert_eq!(log.draws, 30);
    assert_eq!(log.last_pulse_count, 24);
    assert_eq!(log.last_edge_vertices, b.scene().graph().len() * 2);
}

#[test]
fn simulation_runs_without_a_backend() {
    let sched = ManualScheduler::default();
    let mut b = backdrop(sched.clone());
    assert!(b.start());
    for frame in 0..5 {
        assert!(pump(&sched, &mut b, frame));
    }
    assert!(!b.has_backend());
    assert_eq!(b.scene().ticks(), 5);
}

#[test]
fn dispose_leaves_no_outstanding_callbacks() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend::default();
    let mut b = backdrop(sched.clone());
    b.attach_backend(backend.clone());
    b.start();
    for frame in 0..10 {
        pump(&sched, &mut b, frame);
    }
    b.dispose();
    assert_eq!(sched.outstanding(), 0);
    assert!(!b.is_alive());
    assert!(!b.has_pending_frame());
    assert!(!b.has_backend());
    assert_eq!(backend.log.borrow().releases, 1);

    // A callback that raced the cancel does nothing.
    b.run_frame(1.0);
    assert_eq!(b.scene().ticks(), 10);
    assert_eq!(sched.outstanding(), 0);
}

#[test]
fn dispose_is_idempotent() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend::default();
    let mut b = backdrop(sched.clone());
    b.attach_backend(backend.clone());
    b.start();
    b.dispose();
    b.dispose();
    drop(b);
    assert_eq!(backend.log.borrow().releases, 1);
    assert_eq!(sched.log.borrow().cancelled, 1);
}

#[test]
fn drop_tears_down() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend::default();
    {
        let mut b = backdrop(sched.clone());
        b.attach_backend(backend.clone());
        b.start();
    }
    assert_eq!(sched.outstanding(), 0);
    assert_eq!(backend.log.borrow().releases, 1);
}

#[test]
fn backend_arriving_after_dispose_is_released() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend::default();
    let mut b = backdrop(sched.clone());
    b.dispose();
    assert!(!b.attach_backend(backend.clone()));
    assert!(!b.start());
    assert_eq!(backend.log.borrow().releases, 1);
    assert_eq!(sched.outstanding(), 0);
}

#[test]
fn replacing_a_backend_releases_the_old_one() {
    let sched = ManualScheduler::default();
    let first = RecordingBackend::default();
    let second = RecordingBackend::default();
    let mut b = backdrop(sched);
    b.attach_backend(first.clone());
    b.attach_backend(second.clone());
    assert_eq!(first.log.borrow().releases, 1);
    assert_eq!(second.log.borrow().releases, 0);
}

#[test]
fn resize_is_applied_on_the_next_frame_only() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend::default();
    let mut b = backdrop(sched.clone());
    b.attach_backend(backend.clone());
    b.start();
    let before = b.scene().field().positions.clone();
    let wide = Viewport::new(2000.0, 500.0, 1.0).unwrap();
    b.resized(wide);
    assert!(backend.log.borrow().resizes.is_empty());
    assert_eq!(b.scene().field().positions, before);
    pump(&sched, &mut b, 0);
    assert_eq!(backend.log.borrow().resizes, vec![wide]);
    assert!((b.scene().camera().aspect - 4.0).abs() < 1e-6);
    pump(&sched, &mut b, 1);
    assert_eq!(backend.log.borrow().resizes.len(), 1);
    assert_eq!(b.scene().field().len(), 150);
}

#[test]
fn draw_errors_are_counted_and_the_loop_continues() {
    let sched = ManualScheduler::default();
    let backend = RecordingBackend {
        fail: true,
        ..Default::default()
    };
    let mut b = backdrop(sched.clone());
    b.attach_backend(backend.clone());
    b.start();
    for frame in 0..3 {
        assert!(pump(&sched, &mut b, frame));
    }
    assert_eq!(b.frame_errors(), 3);
    assert_eq!(sched.outstanding(), 1);
}
