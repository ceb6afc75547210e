use super::{FrameClock, FrameTime};

/// Frame-pacing collaborator boundary.
///
/// `request_frame` asks for one callback with a timestamp on the next
/// display refresh. The collaborator keeps at most one callback in flight
/// and delivers strictly increasing timestamps.
pub trait FramePacer {
    fn request_frame(&mut self);
}

/// Lifecycle of an [`AnimationLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Idle,
    Running,
    /// No further frames are requested. The loop can be restarted with a
    /// fresh [`start`](AnimationLoop::start).
    Stopped,
}

/// Control directive returned by the per-frame update callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Frame scheduler driving a per-frame update callback.
///
/// `start` requests the first frame from the pacer; every delivered frame
/// runs the callback with a [`FrameTime`] snapshot and requests the next
/// frame, until the callback returns [`LoopControl::Stop`] or
/// [`stop`](Self::stop) is called. Stopping never cancels a frame already
/// in flight; such a frame is simply ignored on delivery.
pub struct AnimationLoop<P: FramePacer> {
    pacer: P,
    clock: FrameClock,
    state: LoopState,
    update: Option<Box<dyn FnMut(FrameTime) -> LoopControl>>,
}

impl<P: FramePacer> AnimationLoop<P> {
    pub fn new(pacer: P) -> Self {
        Self::with_clock(pacer, FrameClock::new())
    }

    pub fn with_clock(pacer: P, clock: FrameClock) -> Self {
        Self {
            pacer,
            clock,
            state: LoopState::Idle,
            update: None,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Begins a schedule: stores the callback and requests the first frame.
    ///
    /// Valid from `Idle` and `Stopped` (restart). Ignored with a warning
    /// while already running; the existing schedule continues.
    pub fn start(&mut self, update: impl FnMut(FrameTime) -> LoopControl + 'static) {
        if self.state == LoopState::Running {
            log::warn!("animation loop start ignored: already running");
            return;
        }

        log::debug!("animation loop starting");
        self.update = Some(Box::new(update));
        self.clock.reset();
        self.state = LoopState::Running;
        self.pacer.request_frame();
    }

    /// Prevents any further frame requests. Idempotent.
    ///
    /// A frame the pacer already has in flight is dropped on delivery
    /// without invoking the callback.
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("animation loop stopped");
        }
        self.state = LoopState::Stopped;
        self.update = None;
    }

    /// Delivers one frame from the pacer.
    ///
    /// Runs the update callback with the timing snapshot for
    /// `timestamp_ms`, then requests the next frame unless the loop stopped
    /// during the callback.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        if self.state != LoopState::Running {
            return;
        }

        let frame = self.clock.tick(timestamp_ms);

        // The callback may call back into this loop's owner, so it is taken
        // out for the duration of the invocation.
        let Some(mut update) = self.update.take() else {
            return;
        };
        let control = update(frame);
        if self.state == LoopState::Running {
            self.update = Some(update);
        }

        if control == LoopControl::Stop {
            self.stop();
        }
        if self.state == LoopState::Running {
            self.pacer.request_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Test pacer recording how many frames were requested.
    #[derive(Clone, Default)]
    struct CountingPacer {
        requests: Rc<RefCell<u32>>,
    }

    impl FramePacer for CountingPacer {
        fn request_frame(&mut self) {
            *self.requests.borrow_mut() += 1;
        }
    }

    fn requests(pacer: &CountingPacer) -> u32 {
        *pacer.requests.borrow()
    }

    // ── schedule ──────────────────────────────────────────────────────────

    #[test]
    fn three_frames_then_stop_invokes_update_exactly_three_times() {
        let pacer = CountingPacer::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut animation = AnimationLoop::new(pacer.clone());

        let sink = Rc::clone(&seen);
        animation.start(move |frame| {
            sink.borrow_mut().push(frame.timestamp_ms);
            LoopControl::Continue
        });
        assert_eq!(animation.state(), LoopState::Running);
        assert_eq!(requests(&pacer), 1);

        animation.on_frame(16.0);
        animation.on_frame(32.0);
        animation.on_frame(48.0);
        animation.stop();

        // A frame already in flight is dropped after stop.
        animation.on_frame(64.0);

        assert_eq!(*seen.borrow(), vec![16.0, 32.0, 48.0]);
        assert_eq!(animation.state(), LoopState::Stopped);
        // One request from start, one after each delivered frame, none after
        // stop.
        assert_eq!(requests(&pacer), 4);
    }

    #[test]
    fn callback_stop_requests_no_further_frame() {
        let pacer = CountingPacer::default();
        let mut animation = AnimationLoop::new(pacer.clone());

        animation.start(|_| LoopControl::Stop);
        animation.on_frame(16.0);

        assert_eq!(animation.state(), LoopState::Stopped);
        assert_eq!(requests(&pacer), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let pacer = CountingPacer::default();
        let mut animation = AnimationLoop::new(pacer.clone());

        animation.start(|_| LoopControl::Continue);
        animation.stop();
        animation.stop();

        assert_eq!(animation.state(), LoopState::Stopped);
        assert_eq!(requests(&pacer), 1);
    }

    #[test]
    fn restart_after_stop_schedules_a_fresh_frame() {
        let pacer = CountingPacer::default();
        let invocations = Rc::new(RefCell::new(0u32));
        let mut animation = AnimationLoop::new(pacer.clone());

        animation.start(|_| LoopControl::Continue);
        animation.on_frame(16.0);
        animation.stop();

        let counter = Rc::clone(&invocations);
        animation.start(move |_| {
            *counter.borrow_mut() += 1;
            LoopControl::Continue
        });
        assert_eq!(animation.state(), LoopState::Running);

        // Timestamps restart with the new schedule's epoch; the clock was
        // reset, so the earlier timestamp is not a regression.
        animation.on_frame(5.0);
        assert_eq!(*invocations.borrow(), 1);
        assert_eq!(requests(&pacer), 4);
    }

    #[test]
    fn frames_before_start_are_ignored() {
        let pacer = CountingPacer::default();
        let mut animation = AnimationLoop::new(pacer.clone());

        animation.on_frame(16.0);
        assert_eq!(animation.state(), LoopState::Idle);
        assert_eq!(requests(&pacer), 0);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let pacer = CountingPacer::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut animation = AnimationLoop::new(pacer.clone());

        let first = Rc::clone(&seen);
        animation.start(move |frame| {
            first.borrow_mut().push(("first", frame.frame_index));
            LoopControl::Continue
        });
        let second = Rc::clone(&seen);
        animation.start(move |frame| {
            second.borrow_mut().push(("second", frame.frame_index));
            LoopControl::Continue
        });
        assert_eq!(requests(&pacer), 1);

        animation.on_frame(16.0);
        assert_eq!(*seen.borrow(), vec![("first", 0)]);
    }
}
