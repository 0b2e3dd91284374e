//! Per-slide element sequencer: state owner, synchronized dispatcher, and
//! keyboard/debounce lifecycle.
//!
//! Every action dispatched here is broadcast under `slideDispatch<n>` and
//! then applied locally. Actions arriving from remote peers are applied
//! locally only, through the same reducer.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::deck::DeckContext;
use crate::input::{Key, KeyInput, KeyListenerGuard, KeyListeners, KeyboardControls};
use crate::sync::{slide_dispatch_event, PresentationChannel, Subscription};

use super::action::{SlideAction, SlideElementState};
use super::debounce::{PressCoalescer, DEFAULT_DEBOUNCE_WINDOW};
use super::reducer::{transition, ReduceContext, Transition};

/// Construction parameters for a [`SlideSequencer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerOptions {
    /// Ordinal of the owning slide; scopes sync messages and activity.
    pub slide_num: usize,
    /// Number of sub-elements, fixed for the slide's lifetime.
    pub slide_elements_length: usize,
    pub keyboard_controls: KeyboardControls,
    /// Starting state; `None` means nothing revealed yet.
    pub initial_state: Option<SlideElementState>,
    /// Coalescing window for repeated "next" presses.
    pub debounce_window: Duration,
}

impl SequencerOptions {
    pub fn new(slide_num: usize, slide_elements_length: usize) -> Self {
        Self {
            slide_num,
            slide_elements_length,
            keyboard_controls: KeyboardControls::Arrows,
            initial_state: None,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
        }
    }

    pub fn keyboard_controls(mut self, controls: KeyboardControls) -> Self {
        self.keyboard_controls = controls;
        self
    }

    pub fn initial_state(mut self, state: SlideElementState) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }
}

/// Slide element state machine bound to a deck and a sync channel.
///
/// Timers are spawned with [`tokio::task::spawn_local`], so key handling
/// must run inside a [`tokio::task::LocalSet`].
pub struct SlideSequencer {
    inner: Rc<Inner>,
}

struct Inner {
    slide_num: usize,
    slide_elements_length: usize,
    keyboard_controls: KeyboardControls,
    event_name: String,
    deck: Rc<dyn DeckContext>,
    channel: Rc<dyn PresentationChannel>,
    state: Cell<SlideElementState>,
    presses: RefCell<PressCoalescer>,
    subscription: RefCell<Option<Subscription>>,
    key_listener: RefCell<Option<KeyListenerGuard>>,
}

impl SlideSequencer {
    /// Build the sequencer and register its remote-message handler.
    pub fn new(
        options: SequencerOptions,
        deck: Rc<dyn DeckContext>,
        channel: Rc<dyn PresentationChannel>,
    ) -> Self {
        let inner = Rc::new(Inner {
            slide_num: options.slide_num,
            slide_elements_length: options.slide_elements_length,
            keyboard_controls: options.keyboard_controls,
            event_name: slide_dispatch_event(options.slide_num),
            deck,
            channel,
            state: Cell::new(options.initial_state.unwrap_or_default()),
            presses: RefCell::new(PressCoalescer::new(options.debounce_window)),
            subscription: RefCell::new(None),
            key_listener: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let subscription = inner.channel.add_message_handler(
            Box::new(move |action| {
                if let Some(inner) = weak.upgrade() {
                    tracing::trace!(slide = inner.slide_num, ?action, "remote slide action");
                    inner.apply(action);
                }
            }),
            &inner.event_name,
        );
        *inner.subscription.borrow_mut() = Some(subscription);

        Self { inner }
    }

    pub fn slide_num(&self) -> usize {
        self.inner.slide_num
    }

    pub fn slide_elements_length(&self) -> usize {
        self.inner.slide_elements_length
    }

    pub fn keyboard_controls(&self) -> KeyboardControls {
        self.inner.keyboard_controls
    }

    /// Sync event name this sequencer sends and listens on.
    pub fn event_name(&self) -> &str {
        &self.inner.event_name
    }

    pub fn state(&self) -> SlideElementState {
        self.inner.state.get()
    }

    /// Whether the owning slide is the deck's current slide.
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Synchronized dispatch: broadcast to peers, then apply locally.
    pub fn dispatch(&self, action: SlideAction) -> Transition {
        self.inner.dispatch(action)
    }

    /// Apply an action locally without broadcasting it.
    pub fn apply(&self, action: SlideAction) -> Transition {
        self.inner.apply(action)
    }

    /// Handle one key according to the slide's control mode.
    /// Returns `true` when the key was consumed.
    pub fn handle_key(&self, input: &KeyInput) -> bool {
        self.inner.handle_key(input)
    }

    /// Attach the key listener while active, detach it otherwise.
    pub fn sync_keyboard(&self, listeners: &KeyListeners) {
        self.inner.sync_keyboard(listeners);
    }

    pub fn has_key_listener(&self) -> bool {
        self.inner.key_listener.borrow().is_some()
    }

    /// "Next" presses waiting for the debounce timer.
    pub fn pending_presses(&self) -> u32 {
        self.inner.presses.borrow().presses()
    }

    /// Release the key listener, pending timer and channel handler.
    /// Safe to call more than once.
    pub fn unmount(&self) {
        self.inner.unmount();
    }
}

impl Drop for SlideSequencer {
    fn drop(&mut self) {
        self.inner.unmount();
    }
}

impl std::fmt::Debug for SlideSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideSequencer")
            .field("slide_num", &self.inner.slide_num)
            .field("slide_elements_length", &self.inner.slide_elements_length)
            .field("state", &self.inner.state.get())
            .finish()
    }
}

impl Inner {
    fn is_active(&self) -> bool {
        self.deck.current_slide() == self.slide_num
    }

    fn dispatch(&self, action: SlideAction) -> Transition {
        self.channel.send_message(&self.event_name, &action);
        self.apply(action)
    }

    fn apply(&self, action: SlideAction) -> Transition {
        let ctx = ReduceContext {
            is_active: self.is_active(),
            slide_elements_length: self.slide_elements_length,
            animations_when_going_back: self.deck.animations_when_going_back(),
        };
        let current = self.state.get();
        let step = transition(&current, action, &ctx);
        match step {
            Transition::Element(next) => {
                tracing::debug!(
                    slide = self.slide_num,
                    ?action,
                    element = ?next.current_slide_element,
                    immediate = next.immediate,
                    "slide element changed"
                );
                self.state.set(next);
            }
            Transition::Deck(deck_action) => {
                tracing::debug!(slide = self.slide_num, ?action, ?deck_action, "handing off to deck");
                self.deck.dispatch(deck_action);
            }
            Transition::Idle => {
                tracing::trace!(slide = self.slide_num, ?action, "inactive slide ignored action");
            }
            Transition::Unchanged => {
                tracing::debug!(slide = self.slide_num, ?action, "unrecognized slide action");
            }
        }
        step
    }

    fn handle_key(self: &Rc<Self>, input: &KeyInput) -> bool {
        if !self.is_active() {
            return false;
        }
        tracing::trace!(slide = self.slide_num, key = ?input.key, "slide key");
        match (self.keyboard_controls, input.key) {
            (KeyboardControls::Arrows, Key::ArrowLeft) => {
                self.dispatch(SlideAction::PrevSlideElement);
                false
            }
            (KeyboardControls::Arrows, Key::ArrowRight) => {
                self.press_next();
                false
            }
            (KeyboardControls::Space, Key::Space) => {
                self.press_next();
                true
            }
            _ => false,
        }
    }

    fn press_next(self: &Rc<Self>) {
        let window = {
            let mut presses = self.presses.borrow_mut();
            presses.record_press();
            presses.window()
        };
        let weak: Weak<Inner> = Rc::downgrade(self);
        let timer = tokio::task::spawn_local(async move {
            tokio::time::sleep(window).await;
            if let Some(inner) = weak.upgrade() {
                inner.fire_presses();
            }
        });
        self.presses.borrow_mut().schedule(timer);
    }

    fn fire_presses(&self) {
        let action = self.presses.borrow_mut().fire();
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn sync_keyboard(self: &Rc<Self>, listeners: &KeyListeners) {
        let wants_listener =
            self.is_active() && self.keyboard_controls != KeyboardControls::Disabled;
        let attached = self.key_listener.borrow().is_some();
        if wants_listener && !attached {
            let weak = Rc::downgrade(self);
            let guard = listeners.add(Rc::new(move |input: &KeyInput| {
                weak.upgrade()
                    .is_some_and(|inner| inner.handle_key(input))
            }));
            *self.key_listener.borrow_mut() = Some(guard);
            tracing::debug!(slide = self.slide_num, "key listener attached");
        } else if !wants_listener && attached {
            let guard = self.key_listener.borrow_mut().take();
            drop(guard);
            tracing::debug!(slide = self.slide_num, "key listener detached");
        }
    }

    fn unmount(&self) {
        let guard = self.key_listener.borrow_mut().take();
        drop(guard);
        self.presses.borrow_mut().cancel();
        let subscription = self.subscription.borrow_mut().take();
        drop(subscription);
    }
}
