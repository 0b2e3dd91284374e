//! Pure slide-element transition function.
//!
//! No I/O happens here: the sequencer decides what to do with a
//! [`Transition`] (store a new state or forward a request to the deck).

use crate::deck::DeckAction;

use super::action::{SlideAction, SlideElementState};

/// Inputs the reducer needs besides the state and the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceContext {
    /// The owning slide is the deck's current slide.
    pub is_active: bool,
    pub slide_elements_length: usize,
    pub animations_when_going_back: bool,
}

/// Outcome of applying one action to a slide's element state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The slide is not active; nothing changes and the deck is not touched.
    Idle,
    /// The element state moves to a new value.
    Element(SlideElementState),
    /// The slide itself should change; local state is left as it was.
    Deck(DeckAction),
    /// Unrecognized action; state is returned unchanged.
    Unchanged,
}

impl Transition {
    /// Element state after this transition is applied to `current`.
    pub fn resolve(self, current: SlideElementState) -> SlideElementState {
        match self {
            Self::Element(next) => next,
            Self::Idle | Self::Deck(_) | Self::Unchanged => current,
        }
    }

    /// Deck request carried by this transition, if any.
    pub fn deck_action(self) -> Option<DeckAction> {
        match self {
            Self::Deck(action) => Some(action),
            _ => None,
        }
    }
}

/// Compute the transition for `action` from `state`.
pub fn transition(
    state: &SlideElementState,
    action: SlideAction,
    ctx: &ReduceContext,
) -> Transition {
    if !ctx.is_active {
        return Transition::Idle;
    }

    let all_revealed = state.revealed_count() >= ctx.slide_elements_length;
    match action {
        SlideAction::NextSlideElement if all_revealed => Transition::Deck(DeckAction::NextSlide),
        SlideAction::NextSlideElement => Transition::Element(SlideElementState {
            current_slide_element: Some(next_index(state)),
            immediate: false,
        }),
        SlideAction::ImmediateNextSlideElement if all_revealed => {
            Transition::Deck(DeckAction::NextSlideImmediate)
        }
        SlideAction::ImmediateNextSlideElement => Transition::Element(SlideElementState {
            current_slide_element: Some(next_index(state)),
            immediate: true,
        }),
        SlideAction::PrevSlideElement => match state.current_slide_element {
            None | Some(0) => Transition::Deck(DeckAction::PrevSlide),
            Some(current) => Transition::Element(SlideElementState {
                current_slide_element: Some(current - 1),
                immediate: !ctx.animations_when_going_back,
            }),
        },
        SlideAction::Unknown => Transition::Unchanged,
    }
}

fn next_index(state: &SlideElementState) -> usize {
    state.current_slide_element.map_or(0, |current| current + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(slide_elements_length: usize) -> ReduceContext {
        ReduceContext {
            is_active: true,
            slide_elements_length,
            animations_when_going_back: true,
        }
    }

    #[test]
    fn next_on_slide_without_elements_requests_next_slide() {
        let state = SlideElementState::default();
        assert_eq!(
            transition(&state, SlideAction::NextSlideElement, &active(0)),
            Transition::Deck(DeckAction::NextSlide)
        );
        assert_eq!(
            transition(&state, SlideAction::ImmediateNextSlideElement, &active(0)),
            Transition::Deck(DeckAction::NextSlideImmediate)
        );
    }

    #[test]
    fn next_walks_elements_then_requests_next_slide() {
        let ctx = active(3);
        let mut state = SlideElementState::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            let step = transition(&state, SlideAction::NextSlideElement, &ctx);
            state = step.resolve(state);
            seen.push(state.current_slide_element);
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(
            transition(&state, SlideAction::NextSlideElement, &ctx),
            Transition::Deck(DeckAction::NextSlide)
        );
    }

    #[test]
    fn out_of_range_initial_state_counts_as_fully_revealed() {
        let state = SlideElementState::at(3);
        assert_eq!(
            transition(&state, SlideAction::NextSlideElement, &active(3)),
            Transition::Deck(DeckAction::NextSlide)
        );
    }

    #[test]
    fn immediate_next_sets_flag() {
        let step = transition(
            &SlideElementState::at(0),
            SlideAction::ImmediateNextSlideElement,
            &active(3),
        );
        assert_eq!(
            step,
            Transition::Element(SlideElementState {
                current_slide_element: Some(1),
                immediate: true,
            })
        );
    }

    #[test]
    fn plain_next_clears_immediate_flag() {
        let state = SlideElementState {
            current_slide_element: Some(0),
            immediate: true,
        };
        let next = transition(&state, SlideAction::NextSlideElement, &active(3)).resolve(state);
        assert_eq!(next, SlideElementState::at(1));
    }

    #[test]
    fn prev_at_first_element_requests_prev_slide() {
        assert_eq!(
            transition(&SlideElementState::at(0), SlideAction::PrevSlideElement, &active(3)),
            Transition::Deck(DeckAction::PrevSlide)
        );
        assert_eq!(
            transition(
                &SlideElementState::default(),
                SlideAction::PrevSlideElement,
                &active(3)
            ),
            Transition::Deck(DeckAction::PrevSlide)
        );
    }

    #[test]
    fn prev_decrements_by_one() {
        let next = transition(&SlideElementState::at(2), SlideAction::PrevSlideElement, &active(3))
            .resolve(SlideElementState::at(2));
        assert_eq!(next.current_slide_element, Some(1));
        assert!(!next.immediate);
    }

    #[test]
    fn prev_without_back_animation_is_immediate() {
        let ctx = ReduceContext {
            animations_when_going_back: false,
            ..active(3)
        };
        let step = transition(&SlideElementState::at(2), SlideAction::PrevSlideElement, &ctx);
        assert_eq!(
            step,
            Transition::Element(SlideElementState {
                current_slide_element: Some(1),
                immediate: true,
            })
        );
    }

    #[test]
    fn inactive_slide_is_idle_for_every_action() {
        let ctx = ReduceContext {
            is_active: false,
            ..active(0)
        };
        for action in [
            SlideAction::NextSlideElement,
            SlideAction::ImmediateNextSlideElement,
            SlideAction::PrevSlideElement,
            SlideAction::Unknown,
        ] {
            assert_eq!(
                transition(&SlideElementState::at(0), action, &ctx),
                Transition::Idle
            );
        }
    }

    #[test]
    fn unknown_action_leaves_state_unchanged() {
        let state = SlideElementState::at(1);
        let step = transition(&state, SlideAction::Unknown, &active(3));
        assert_eq!(step, Transition::Unchanged);
        assert_eq!(step.resolve(state), state);
        assert_eq!(step.deck_action(), None);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_action() -> impl Strategy<Value = SlideAction> {
            prop_oneof![
                Just(SlideAction::NextSlideElement),
                Just(SlideAction::ImmediateNextSlideElement),
                Just(SlideAction::PrevSlideElement),
                Just(SlideAction::Unknown),
            ]
        }

        proptest! {
            #[test]
            fn index_stays_within_slide_elements(
                len in 0usize..8,
                actions in proptest::collection::vec(any_action(), 0..40),
                animate_back in any::<bool>(),
            ) {
                let ctx = ReduceContext {
                    is_active: true,
                    slide_elements_length: len,
                    animations_when_going_back: animate_back,
                };
                let mut state = SlideElementState::default();
                for action in actions {
                    let before = state;
                    state = transition(&state, action, &ctx).resolve(state);
                    if let Some(index) = state.current_slide_element {
                        prop_assert!(index < len);
                    }
                    match action {
                        SlideAction::NextSlideElement | SlideAction::ImmediateNextSlideElement => {
                            prop_assert!(state.revealed_count() >= before.revealed_count());
                        }
                        SlideAction::PrevSlideElement => {
                            prop_assert!(state.revealed_count() <= before.revealed_count());
                        }
                        SlideAction::Unknown => prop_assert_eq!(state, before),
                    }
                }
            }

            #[test]
            fn inactive_slides_never_transition(
                len in 0usize..8,
                start in proptest::option::of(0usize..8),
                action in any_action(),
            ) {
                let ctx = ReduceContext {
                    is_active: false,
                    slide_elements_length: len,
                    animations_when_going_back: false,
                };
                let state = SlideElementState { current_slide_element: start, immediate: false };
                prop_assert_eq!(transition(&state, action, &ctx), Transition::Idle);
            }
        }
    }
}
