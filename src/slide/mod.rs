//! Slides and the per-slide element sequencer.
//!
//! A slide reveals its sub-elements one at a time. The reducer in
//! [`reducer`] decides every step; [`SlideSequencer`] owns the state, keeps
//! peers in sync, and turns key presses into actions.

mod action;
mod debounce;
mod reducer;
mod sequencer;

pub use action::{SlideAction, SlideElementState};
pub use debounce::{PressCoalescer, DEFAULT_DEBOUNCE_WINDOW};
pub use reducer::{transition, ReduceContext, Transition};
pub use sequencer::{SequencerOptions, SlideSequencer};

use crate::ui::code_pane::CodePane;

/// One slide: its content plus the sequencer revealing it.
#[derive(Debug)]
pub struct Slide {
    pub title: String,
    /// Markdown snippets, revealed in order.
    pub elements: Vec<String>,
    pub code: Option<CodePane>,
    sequencer: SlideSequencer,
}

impl Slide {
    pub fn new(
        title: impl Into<String>,
        elements: Vec<String>,
        code: Option<CodePane>,
        sequencer: SlideSequencer,
    ) -> Self {
        Self {
            title: title.into(),
            elements,
            code,
            sequencer,
        }
    }

    pub fn sequencer(&self) -> &SlideSequencer {
        &self.sequencer
    }

    pub fn slide_num(&self) -> usize {
        self.sequencer.slide_num()
    }

    /// Elements revealed so far, in order.
    pub fn visible_elements(&self) -> &[String] {
        let revealed = self
            .sequencer
            .state()
            .revealed_count()
            .min(self.elements.len());
        &self.elements[..revealed]
    }

    /// Whether the most recent reveal should skip its animation.
    pub fn is_immediate(&self) -> bool {
        self.sequencer.state().immediate
    }
}
