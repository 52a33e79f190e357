//! FrameLoop - a self-rearming per-frame task with an explicit lifecycle
//!
//! Each armed callback captures the generation it was armed for. `stop`
//! bumps the generation and cancels the pending request, so a callback that
//! still fires afterwards (or one from before a restart) returns without
//! running the body. Dropping the loop drops the shared state and every
//! outstanding callback becomes a no-op.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::scheduler::{FrameHandle, FrameScheduler};

type FrameBody = Box<dyn FnMut() -> Result<(), String>>;

struct LoopShared<S: FrameScheduler> {
    scheduler: S,
    running: Cell<bool>,
    generation: Cell<u64>,
    pending: Cell<Option<FrameHandle>>,
    frames: Cell<u64>,
    body: RefCell<FrameBody>,
}

impl<S: FrameScheduler> LoopShared<S> {
    fn is_current(&self, generation: u64) -> bool {
        self.running.get() && self.generation.get() == generation
    }
}

pub struct FrameLoop<S: FrameScheduler + 'static> {
    shared: Rc<LoopShared<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    pub fn new<B>(scheduler: S, body: B) -> Self
    where
        B: FnMut() -> Result<(), String> + 'static,
    {
        Self {
            shared: Rc::new(LoopShared {
                scheduler,
                running: Cell::new(false),
                generation: Cell::new(0),
                pending: Cell::new(None),
                frames: Cell::new(0),
                body: RefCell::new(Box::new(body)),
            }),
        }
    }

    /// Arm the first frame. No-op if already running.
    pub fn start(&self) -> Result<(), String> {
        let shared = &self.shared;
        if shared.running.get() {
            return Ok(());
        }
        shared.running.set(true);
        let generation = shared.generation.get() + 1;
        shared.generation.set(generation);

        if let Err(e) = Self::arm(shared, generation) {
            shared.running.set(false);
            return Err(e);
        }
        Ok(())
    }

    /// Cancel the pending frame and invalidate any callback already in flight
    pub fn stop(&self) {
        let shared = &self.shared;
        shared.running.set(false);
        shared.generation.set(shared.generation.get() + 1);
        if let Some(handle) = shared.pending.take() {
            shared.scheduler.cancel_frame(handle);
        }
    }

    /// `stop` + `start` on a fresh generation
    pub fn restart(&self) -> Result<(), String> {
        self.stop();
        self.start()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    /// Frames whose body has run since creation
    pub fn frames(&self) -> u64 {
        self.shared.frames.get()
    }

    pub fn generation(&self) -> u64 {
        self.shared.generation.get()
    }

    pub fn scheduler(&self) -> &S {
        &self.shared.scheduler
    }

    fn arm(shared: &Rc<LoopShared<S>>, generation: u64) -> Result<(), String> {
        let weak: Weak<LoopShared<S>> = Rc::downgrade(shared);
        let handle = shared.scheduler.request_frame(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                Self::on_frame(&shared, generation);
            }
        }))?;
        shared.pending.set(Some(handle));
        Ok(())
    }

    fn on_frame(shared: &Rc<LoopShared<S>>, generation: u64) {
        if !shared.is_current(generation) {
            return;
        }
        shared.pending.set(None);

        let result = {
            let mut body = shared.body.borrow_mut();
            (&mut *body)()
        };
        shared.frames.set(shared.frames.get() + 1);

        if let Err(e) = result {
            warn!("frame loop stopped: {}", e);
            shared.running.set(false);
            return;
        }

        if shared.is_current(generation) {
            if let Err(e) = Self::arm(shared, generation) {
                warn!("frame loop stopped: {}", e);
                shared.running.set(false);
            }
        }
    }
}

impl<S: FrameScheduler + 'static> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scheduler::ManualScheduler;

    fn counting_loop(scheduler: &ManualScheduler) -> (FrameLoop<ManualScheduler>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let frame_loop = FrameLoop::new(scheduler.clone(), move || {
            c.set(c.get() + 1);
            Ok(())
        });
        (frame_loop, count)
    }

    #[test]
    fn runs_once_per_frame_and_rearms() {
        let scheduler = ManualScheduler::new();
        let (frame_loop, count) = counting_loop(&scheduler);

        frame_loop.start().unwrap();
        for _ in 0..5 {
            assert_eq!(scheduler.pending(), 1);
            scheduler.run_frame();
        }
        assert_eq!(count.get(), 5);
        assert_eq!(frame_loop.frames(), 5);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn start_twice_keeps_one_pending_frame() {
        let scheduler = ManualScheduler::new();
        let (frame_loop, count) = counting_loop(&scheduler);

        frame_loop.start().unwrap();
        frame_loop.start().unwrap();
        assert_eq!(scheduler.pending(), 1);
        scheduler.run_frame();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let scheduler = ManualScheduler::new();
        let (frame_loop, count) = counting_loop(&scheduler);

        frame_loop.start().unwrap();
        scheduler.run_frame();
        frame_loop.stop();

        assert_eq!(scheduler.pending(), 0);
        scheduler.run_frame();
        assert_eq!(count.get(), 1);
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn restart_never_runs_two_chains() {
        let scheduler = ManualScheduler::new();
        let (frame_loop, count) = counting_loop(&scheduler);

        frame_loop.start().unwrap();
        let first_generation = frame_loop.generation();
        frame_loop.restart().unwrap();
        assert!(frame_loop.generation() > first_generation);

        for _ in 0..3 {
            assert_eq!(scheduler.pending(), 1);
            scheduler.run_frame();
        }
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn stale_callback_is_ignored() {
        // A scheduler that cannot cancel: the old callback still fires
        struct NoCancel(ManualScheduler);
        impl FrameScheduler for NoCancel {
            fn request_frame(&self, cb: crate::api::scheduler::FrameCallback) -> Result<FrameHandle, String> {
                self.0.request_frame(cb)
            }
            fn cancel_frame(&self, _handle: FrameHandle) {}
        }

        let inner = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let frame_loop = FrameLoop::new(NoCancel(inner.clone()), move || {
            c.set(c.get() + 1);
            Ok(())
        });

        frame_loop.start().unwrap();
        frame_loop.restart().unwrap();
        assert_eq!(inner.pending(), 2);

        inner.run_frame();
        assert_eq!(count.get(), 1);
        assert_eq!(inner.pending(), 1);
    }

    #[test]
    fn body_error_stops_the_loop() {
        let scheduler = ManualScheduler::new();
        let frame_loop = FrameLoop::new(scheduler.clone(), || Err("surface lost".to_string()));

        frame_loop.start().unwrap();
        scheduler.run_frame();
        assert!(!frame_loop.is_running());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn dropping_the_loop_disarms_it() {
        let scheduler = ManualScheduler::new();
        let (frame_loop, count) = counting_loop(&scheduler);

        frame_loop.start().unwrap();
        drop(frame_loop);
        scheduler.run_frame();
        assert_eq!(count.get(), 0);
    }
}
