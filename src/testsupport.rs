//! Shared test fixtures for config, deck, and sequencer test modules.
//!
//! Keeping temp-dir handling and the recording fakes here saves each test
//! module from rebuilding its own deck and channel stand-ins.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::deck::{DeckAction, DeckContext};
use crate::slide::SlideAction;
use crate::sync::{MessageHandler, PresentationChannel, Subscription};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("slidekit-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Deck fake with a settable current slide that records every request.
#[derive(Debug)]
pub struct RecordingDeck {
    current: Cell<usize>,
    animations_when_going_back: bool,
    dispatched: RefCell<Vec<DeckAction>>,
}

impl RecordingDeck {
    pub fn new(current_slide: usize, animations_when_going_back: bool) -> Self {
        Self {
            current: Cell::new(current_slide),
            animations_when_going_back,
            dispatched: RefCell::new(Vec::new()),
        }
    }

    pub fn set_current(&self, slide: usize) {
        self.current.set(slide);
    }

    pub fn dispatched(&self) -> Vec<DeckAction> {
        self.dispatched.borrow().clone()
    }
}

impl DeckContext for RecordingDeck {
    fn current_slide(&self) -> usize {
        self.current.get()
    }

    fn animations_when_going_back(&self) -> bool {
        self.animations_when_going_back
    }

    fn dispatch(&self, action: DeckAction) {
        self.dispatched.borrow_mut().push(action);
    }
}

type HandlerSlots = Rc<RefCell<HashMap<String, Vec<(u64, Rc<dyn Fn(SlideAction)>)>>>>;

/// Channel fake: records sends and lets tests play remote messages.
#[derive(Default)]
pub struct RecordingChannel {
    sent: RefCell<Vec<(String, SlideAction)>>,
    next_id: Cell<u64>,
    handlers: HandlerSlots,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<(String, SlideAction)> {
        self.sent.borrow().clone()
    }

    /// Invoke handlers for `event` as if a remote peer sent `action`.
    /// Returns how many handlers ran.
    pub fn deliver(&self, event: &str, action: SlideAction) -> usize {
        let handlers = self
            .handlers
            .borrow()
            .get(event)
            .map(|slots| slots.iter().map(|(_, h)| Rc::clone(h)).collect::<Vec<_>>())
            .unwrap_or_default();
        for handler in &handlers {
            handler(action);
        }
        handlers.len()
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.borrow().get(event).map_or(0, Vec::len)
    }
}

impl PresentationChannel for RecordingChannel {
    fn send_message(&self, event_name: &str, payload: &SlideAction) {
        self.sent
            .borrow_mut()
            .push((event_name.to_string(), *payload));
    }

    fn add_message_handler(&self, handler: MessageHandler, event_name: &str) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers
            .borrow_mut()
            .entry(event_name.to_string())
            .or_default()
            .push((id, Rc::from(handler)));
        let handlers = Rc::clone(&self.handlers);
        let event = event_name.to_string();
        Subscription::new(move || {
            if let Some(slots) = handlers.borrow_mut().get_mut(&event) {
                slots.retain(|(slot_id, _)| *slot_id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_nested_files() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn recording_channel_tracks_handlers() {
        let channel = RecordingChannel::default();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let sub = channel.add_message_handler(
            Box::new(move |_| counter.set(counter.get() + 1)),
            "slideDispatch1",
        );
        assert_eq!(channel.deliver("slideDispatch1", SlideAction::NextSlideElement), 1);
        assert_eq!(seen.get(), 1);
        drop(sub);
        assert_eq!(channel.handler_count("slideDispatch1"), 0);
    }
}
