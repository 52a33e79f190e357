use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub type FrameCallback = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// One-shot "call me on the next display refresh" capability.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, String>;

    fn cancel_frame(&self, handle: FrameHandle);
}

/// Callbacks waiting for a frame, oldest first
#[derive(Default)]
pub struct PendingFrames {
    next_handle: i32,
    queue: VecDeque<(FrameHandle, FrameCallback)>,
}

impl PendingFrames {
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_handle(&mut self) -> FrameHandle {
        self.next_handle += 1;
        FrameHandle(self.next_handle)
    }

    pub fn push(&mut self, handle: FrameHandle, callback: FrameCallback) {
        self.queue.push_back((handle, callback));
    }

    /// Drops the callback; it will never run
    pub fn cancel(&mut self, handle: FrameHandle) {
        self.queue.retain(|(h, _)| *h != handle);
    }

    pub fn pop_oldest(&mut self) -> Option<FrameCallback> {
        self.queue.pop_front().map(|(_, callback)| callback)
    }

    pub fn take_all(&mut self) -> VecDeque<(FrameHandle, FrameCallback)> {
        std::mem::take(&mut self.queue)
    }
}

/// `window.requestAnimationFrame`
///
/// Every request hands the browser the same JS function. The browser fires
/// requests in the order they were made, so each call runs the oldest
/// queued callback. Cancelling removes the callback from the queue too.
pub struct RafScheduler {
    window: web_sys::Window,
    pending: Rc<RefCell<PendingFrames>>,
    trampoline: Closure<dyn FnMut()>,
}

impl RafScheduler {
    pub fn new() -> Result<Self, String> {
        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        let pending = Rc::new(RefCell::new(PendingFrames::default()));

        let queue = pending.clone();
        let trampoline = Closure::wrap(Box::new(move || {
            // Release the borrow before running: the callback re-arms
            let next = queue.borrow_mut().pop_oldest();
            if let Some(callback) = next {
                callback();
            }
        }) as Box<dyn FnMut()>);

        Ok(Self { window, pending, trampoline })
    }

    /// Callbacks still owned by the scheduler
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, String> {
        let id = self
            .window
            .request_animation_frame(self.trampoline.as_ref().unchecked_ref())
            .map_err(|e| format!("requestAnimationFrame failed: {:?}", e))?;
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push(handle, callback);
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
        self.pending.borrow_mut().cancel(handle);
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        // The trampoline must not be called once it is freed
        let handles: Vec<FrameHandle> = self.pending.borrow_mut().take_all().into_iter().map(|(h, _)| h).collect();
        for handle in handles {
            let _ = self.window.cancel_animation_frame(handle.0);
        }
    }
}

/// Frames fire only when `run_frame` is called. Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<PendingFrames>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fire every callback queued before this call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let batch = self.queue.borrow_mut().take_all();
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, String> {
        let mut queue = self.queue.borrow_mut();
        let handle = queue.next_handle();
        queue.push(handle, callback);
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn manual_runs_only_queued_batch() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let s = scheduler.clone();
        scheduler
            .request_frame(Box::new(move || {
                h.set(h.get() + 1);
                // Re-arming lands in the next batch
                let h2 = h.clone();
                let _ = s.request_frame(Box::new(move || h2.set(h2.get() + 10)));
            }))
            .unwrap();

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn cancelled_frame_never_fires() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let handle = scheduler.request_frame(Box::new(move || f.set(true))).unwrap();

        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.run_frame(), 0);
        assert!(!fired.get());
    }

    #[test]
    fn cancelled_callback_is_freed() {
        let mut frames = PendingFrames::default();
        let captured = Rc::new(());
        let held = captured.clone();
        let handle = frames.next_handle();
        frames.push(handle, Box::new(move || drop(held)));
        assert_eq!(Rc::strong_count(&captured), 2);

        frames.cancel(handle);
        assert!(frames.is_empty());
        assert_eq!(Rc::strong_count(&captured), 1);
    }

    #[test]
    fn pending_frames_pop_oldest_first() {
        let mut frames = PendingFrames::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut handles = Vec::new();
        for i in 0..3 {
            let o = order.clone();
            let handle = frames.next_handle();
            frames.push(handle, Box::new(move || o.borrow_mut().push(i)));
            handles.push(handle);
        }
        frames.cancel(handles[1]);

        while let Some(callback) = frames.pop_oldest() {
            callback();
        }
        assert_eq!(*order.borrow(), vec![0, 2]);
    }

    #[test]
    fn repeated_stop_start_holds_one_callback() {
        use crate::api::frame_loop::FrameLoop;

        let scheduler = ManualScheduler::new();
        let frame_loop = FrameLoop::new(scheduler.clone(), || Ok(()));
        for _ in 0..100 {
            frame_loop.start().unwrap();
            frame_loop.stop();
        }
        frame_loop.start().unwrap();
        assert_eq!(scheduler.pending(), 1);
    }
}
