//! Coalescing of rapid "next" presses.
//!
//! Presses are counted while a trailing-edge timer runs; every press restarts
//! the timer. When it fires, one press means an animated step and several
//! presses mean an immediate one. The counter is reset on every firing.

use std::time::Duration;

use tokio::task::JoinHandle;

use super::action::SlideAction;

/// Default coalescing window for "next" presses.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Press counter plus the pending timer task, owned by one sequencer.
#[derive(Debug)]
pub struct PressCoalescer {
    window: Duration,
    presses: u32,
    pending: Option<JoinHandle<()>>,
}

impl PressCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            presses: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Presses counted since the last firing.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    /// Count one press.
    pub fn record_press(&mut self) {
        self.presses = self.presses.saturating_add(1);
    }

    /// Install the timer for the current window, aborting any earlier one.
    pub fn schedule(&mut self, timer: JoinHandle<()>) {
        if let Some(previous) = self.pending.replace(timer) {
            previous.abort();
        }
    }

    /// Action for the presses collected so far; resets the counter.
    pub fn fire(&mut self) -> Option<SlideAction> {
        self.pending = None;
        let presses = std::mem::take(&mut self.presses);
        match presses {
            0 => None,
            1 => Some(SlideAction::NextSlideElement),
            _ => Some(SlideAction::ImmediateNextSlideElement),
        }
    }

    /// Drop counted presses and abort the pending timer.
    pub fn cancel(&mut self) {
        self.presses = 0;
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for PressCoalescer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_press_is_animated_step() {
        let mut coalescer = PressCoalescer::new(DEFAULT_DEBOUNCE_WINDOW);
        coalescer.record_press();
        assert_eq!(coalescer.fire(), Some(SlideAction::NextSlideElement));
        assert_eq!(coalescer.presses(), 0);
    }

    #[test]
    fn several_presses_are_immediate_step() {
        let mut coalescer = PressCoalescer::new(DEFAULT_DEBOUNCE_WINDOW);
        coalescer.record_press();
        coalescer.record_press();
        coalescer.record_press();
        assert_eq!(coalescer.fire(), Some(SlideAction::ImmediateNextSlideElement));
        assert_eq!(coalescer.fire(), None);
    }

    #[test]
    fn cancel_forgets_presses() {
        let mut coalescer = PressCoalescer::new(Duration::from_millis(50));
        coalescer.record_press();
        coalescer.cancel();
        assert_eq!(coalescer.fire(), None);
        assert!(!coalescer.is_pending());
    }

    #[tokio::test]
    async fn rescheduling_aborts_previous_timer() {
        let mut coalescer = PressCoalescer::new(DEFAULT_DEBOUNCE_WINDOW);
        let first = tokio::spawn(std::future::pending::<()>());
        let first_abort = first.abort_handle();
        coalescer.schedule(first);
        coalescer.schedule(tokio::spawn(std::future::pending::<()>()));
        for _ in 0..16 {
            if first_abort.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(first_abort.is_finished());
        coalescer.cancel();
    }
}
