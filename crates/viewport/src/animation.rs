use std::cell::Cell;
use std::rc::Rc;

/// Cooperative repeating task, ticked once per display refresh by the host.
///
/// Created together with its [`LoopHandle`]. Once the handle is stopped the
/// loop refuses every further tick.
#[derive(Debug)]
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    ticks: u64,
}

/// Stop handle for an [`AnimationLoop`]. Stopping consumes it, so a loop can
/// be cancelled at most once.
#[derive(Debug)]
#[must_use = "dropping the handle leaves the loop running with no way to stop it"]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl AnimationLoop {
    /// Start a loop and acquire its stop handle.
    pub fn start() -> (Self, LoopHandle) {
        let running = Rc::new(Cell::new(true));
        let handle = LoopHandle {
            running: Rc::clone(&running),
        };
        (Self { running, ticks: 0 }, handle)
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Ticks that have run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one iteration if the loop is still live. Returns `None` once stopped.
    pub fn tick<R>(&mut self, frame: impl FnOnce() -> R) -> Option<R> {
        if !self.running.get() {
            return None;
        }
        self.ticks += 1;
        Some(frame())
    }
}

impl LoopHandle {
    /// Cancel the loop. No tick runs after this returns.
    pub fn stop(self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}
