//! Presentation-wide deck state and the capability handle slides use to
//! read it and request whole-slide navigation.
//!
//! Slides never mutate [`DeckState`] directly. They receive an explicit
//! [`DeckContext`] and call [`DeckContext::dispatch`] with a [`DeckAction`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

pub mod file;

pub use file::{load_deck_file, parse_deck, CodeSpec, DeckFile, SlideSpec};

/// Whole-slide navigation requests accepted by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeckAction {
    NextSlide,
    NextSlideImmediate,
    PrevSlide,
}

/// Snapshot of presentation-wide navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckState {
    /// Index of the slide currently shown (0-based).
    pub current_slide: usize,
    pub slide_count: usize,
    /// The last transition should skip its animation.
    pub immediate: bool,
    /// Animate transitions when navigating backwards.
    pub animations_when_going_back: bool,
}

impl DeckState {
    pub fn new(slide_count: usize, animations_when_going_back: bool) -> Self {
        Self {
            current_slide: 0,
            slide_count,
            immediate: false,
            animations_when_going_back,
        }
    }
}

/// Narrow read/dispatch interface handed to every slide.
pub trait DeckContext {
    /// Index of the active slide.
    fn current_slide(&self) -> usize;
    /// Global "animate when going back" setting.
    fn animations_when_going_back(&self) -> bool;
    /// Request a whole-slide transition.
    fn dispatch(&self, action: DeckAction);
}

/// Apply one deck action. Navigation clamps at both ends of the deck.
pub fn reduce_deck(state: &DeckState, action: DeckAction) -> DeckState {
    let mut next = state.clone();
    let last = state.slide_count.saturating_sub(1);
    match action {
        DeckAction::NextSlide | DeckAction::NextSlideImmediate => {
            if state.current_slide < last {
                next.current_slide = state.current_slide + 1;
                next.immediate = action == DeckAction::NextSlideImmediate;
            }
        }
        DeckAction::PrevSlide => {
            if state.current_slide > 0 {
                next.current_slide = state.current_slide - 1;
                next.immediate = !state.animations_when_going_back;
            }
        }
    }
    next
}

/// Shared, single-threaded deck handle.
///
/// Cloning is cheap; every clone observes the same state.
#[derive(Debug, Clone)]
pub struct Deck {
    state: Rc<RefCell<DeckState>>,
}

impl Deck {
    pub fn new(slide_count: usize, animations_when_going_back: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(DeckState::new(
                slide_count,
                animations_when_going_back,
            ))),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> DeckState {
        self.state.borrow().clone()
    }

    pub fn slide_count(&self) -> usize {
        self.state.borrow().slide_count
    }
}

impl DeckContext for Deck {
    fn current_slide(&self) -> usize {
        self.state.borrow().current_slide
    }

    fn animations_when_going_back(&self) -> bool {
        self.state.borrow().animations_when_going_back
    }

    fn dispatch(&self, action: DeckAction) {
        let mut state = self.state.borrow_mut();
        let next = reduce_deck(&state, action);
        if next.current_slide != state.current_slide {
            tracing::debug!(
                from = state.current_slide,
                to = next.current_slide,
                immediate = next.immediate,
                ?action,
                "deck moved"
            );
        } else {
            tracing::debug!(slide = state.current_slide, ?action, "deck at boundary");
        }
        *state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_slide_advances_until_last() {
        let deck = Deck::new(3, true);
        deck.dispatch(DeckAction::NextSlide);
        deck.dispatch(DeckAction::NextSlide);
        assert_eq!(deck.current_slide(), 2);
        deck.dispatch(DeckAction::NextSlide);
        assert_eq!(deck.current_slide(), 2);
    }

    #[test]
    fn immediate_next_marks_transition() {
        let deck = Deck::new(2, true);
        deck.dispatch(DeckAction::NextSlideImmediate);
        let state = deck.snapshot();
        assert_eq!(state.current_slide, 1);
        assert!(state.immediate);
    }

    #[test]
    fn prev_slide_respects_back_animation_setting() {
        let animated = DeckState {
            current_slide: 1,
            ..DeckState::new(2, true)
        };
        assert!(!reduce_deck(&animated, DeckAction::PrevSlide).immediate);

        let instant = DeckState {
            current_slide: 1,
            ..DeckState::new(2, false)
        };
        let next = reduce_deck(&instant, DeckAction::PrevSlide);
        assert_eq!(next.current_slide, 0);
        assert!(next.immediate);
    }

    #[test]
    fn prev_slide_stays_on_first_slide() {
        let state = DeckState::new(4, false);
        assert_eq!(reduce_deck(&state, DeckAction::PrevSlide), state);
    }

    #[test]
    fn empty_deck_never_moves() {
        let state = DeckState::new(0, true);
        assert_eq!(reduce_deck(&state, DeckAction::NextSlide).current_slide, 0);
    }

    #[test]
    fn deck_actions_use_wire_names() {
        let json = serde_json::to_string(&DeckAction::NextSlideImmediate).expect("encode");
        assert_eq!(json, r#"{"type":"NEXT_SLIDE_IMMEDIATE"}"#);
        let decoded: DeckAction = serde_json::from_str(r#"{"type":"PREV_SLIDE"}"#).expect("decode");
        assert_eq!(decoded, DeckAction::PrevSlide);
    }

    #[test]
    fn clones_share_state() {
        let deck = Deck::new(3, true);
        let other = deck.clone();
        other.dispatch(DeckAction::NextSlide);
        assert_eq!(deck.current_slide(), 1);
    }
}
