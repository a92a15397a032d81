use std::cell::Cell;

use super::*;

struct RefusingScheduler;

impl FrameScheduler for RefusingScheduler {
    fn request_frame(&self, _callback: FrameCallback) -> Result<(), ChromeError> {
        Err(ChromeError::Js("no window".into()))
    }
}

#[test]
fn loop_waits_for_first_frame() {
    let scheduler = Rc::new(ManualScheduler::new());
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    run_loop(Rc::clone(&scheduler), move || seen.set(seen.get() + 1));
    assert_eq!(count.get(), 0);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn exactly_n_frames_run() {
    let scheduler = Rc::new(ManualScheduler::new());
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    run_loop(Rc::clone(&scheduler), move || seen.set(seen.get() + 1));
    assert_eq!(scheduler.run_frames(5), 5);
    assert_eq!(count.get(), 5);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn run_frames_on_empty_queue_returns_zero() {
    let scheduler = ManualScheduler::new();
    assert_eq!(scheduler.run_frames(3), 0);
}

#[test]
fn refused_request_stops_quietly() {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    run_loop(Rc::new(RefusingScheduler), move || seen.set(seen.get() + 1));
    assert_eq!(count.get(), 0);
}
