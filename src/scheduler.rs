//! Frame scheduling for the animation loop.
//!
//! The loop never sleeps or polls; each frame asks a [`FrameScheduler`] for
//! the next one. In the browser that is `requestAnimationFrame`, in tests a
//! [`ManualScheduler`] that only advances when told to.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::ChromeError;

pub type FrameCallback = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    /// Arrange for `callback` to run once, at the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error when the host refuses the request.
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ChromeError>;
}

/// Queues callbacks until [`ManualScheduler::run_frames`] drains them.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks waiting for a frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run up to `count` frames, one queued callback each. Callbacks queued
    /// while a frame runs wait for the next one. Returns the frames run.
    pub fn run_frames(&self, count: usize) -> usize {
        for ran in 0..count {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(callback) => callback(),
                None => return ran,
            }
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ChromeError> {
        self.queue.borrow_mut().push_back(callback);
        Ok(())
    }
}

/// Run `frame` once per scheduled frame for as long as the scheduler keeps
/// accepting requests. There is no stop handle: the loop lives until the
/// page does, or until a request is refused.
pub fn run_loop<S, F>(scheduler: Rc<S>, frame: F)
where
    S: FrameScheduler + 'static,
    F: FnMut() + 'static,
{
    schedule_next(scheduler, Rc::new(RefCell::new(frame)));
}

fn schedule_next<S, F>(scheduler: Rc<S>, frame: Rc<RefCell<F>>)
where
    S: FrameScheduler + 'static,
    F: FnMut() + 'static,
{
    let next = Rc::clone(&scheduler);
    let request = scheduler.request_frame(Box::new(move || {
        {
            let mut run = frame.borrow_mut();
            (*run)();
        }
        schedule_next(next, frame);
    }));
    if let Err(err) = request {
        log::warn!("animation loop stopped: {err}");
    }
}
