//! Presenter/audience synchronization.
//!
//! Slides broadcast every dispatched [`SlideAction`] under a per-slide event
//! name so remote peers replay the identical action. Delivery guarantees
//! (ordering, retries) belong to the channel implementation; this crate
//! ships an in-process [`LocalBus`].

use crate::slide::SlideAction;

mod bus;

pub use bus::{BusPeer, LocalBus, PeerId, SyncEnvelope};

/// Receiver invoked for every message delivered under an event name.
pub type MessageHandler = Box<dyn Fn(SlideAction)>;

/// Event name scoping messages to one slide's sequencer.
pub fn slide_dispatch_event(slide_num: usize) -> String {
    format!("slideDispatch{slide_num}")
}

/// Broadcast channel shared by presentation peers.
pub trait PresentationChannel {
    /// Broadcast `payload` to remote peers listening on `event_name`.
    fn send_message(&self, event_name: &str, payload: &SlideAction);

    /// Register `handler` for `event_name`. Dropping the returned
    /// [`Subscription`] deregisters it.
    fn add_message_handler(&self, handler: MessageHandler, event_name: &str) -> Subscription;
}

/// Registration token; deregisters its handler when dropped.
#[must_use = "dropping a Subscription immediately deregisters its handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription with nothing to release.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Deregister now instead of waiting for drop.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn event_name_is_scoped_by_slide_number() {
        assert_eq!(slide_dispatch_event(2), "slideDispatch2");
        assert_eq!(slide_dispatch_event(0), "slideDispatch0");
    }

    #[test]
    fn subscription_cancels_once_on_drop() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));
        drop(subscription);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn explicit_cancel_does_not_run_twice() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        Subscription::new(move || counter.set(counter.get() + 1)).cancel();
        assert_eq!(calls.get(), 1);
    }
}
