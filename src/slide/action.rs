//! Slide-element actions and the per-slide element state they drive.

use serde::{Deserialize, Serialize};

/// Action understood by a slide's element sequencer.
///
/// This is also the payload broadcast to remote peers, so it serializes as
/// `{"type": "NEXT_SLIDE_ELEMENT"}` and friends. Any other `type` decodes to
/// [`SlideAction::Unknown`], which the reducer treats as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideAction {
    NextSlideElement,
    ImmediateNextSlideElement,
    PrevSlideElement,
    #[serde(other)]
    Unknown,
}

/// Which sub-element of a slide is currently revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideElementState {
    /// Index of the last revealed element; `None` is "before element 0".
    pub current_slide_element: Option<usize>,
    /// The last transition should skip its animation.
    #[serde(default)]
    pub immediate: bool,
}

impl SlideElementState {
    /// State with element `index` revealed.
    pub fn at(index: usize) -> Self {
        Self {
            current_slide_element: Some(index),
            immediate: false,
        }
    }

    /// Number of elements revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.current_slide_element.map_or(0, |index| index + 1)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.current_slide_element
            .is_some_and(|current| index <= current)
    }
}
