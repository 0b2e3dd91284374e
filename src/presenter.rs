//! A running presentation: one deck, its slides, and the key routing that
//! connects them.
//!
//! The presenter and an optional audience replica are both
//! [`Presentation`]s. They share nothing but a sync channel; the replica
//! reaches the same slide and element because it replays the same actions.

use std::rc::Rc;
use std::time::Duration;

use crate::config::{DisplayConfig, PresentationConfig};
use crate::deck::{Deck, DeckContext, DeckFile};
use crate::input::{KeyInput, KeyListeners, KeyboardControls};
use crate::slide::{SequencerOptions, Slide, SlideElementState, SlideSequencer};
use crate::sync::PresentationChannel;
use crate::ui::code_pane::CodePane;
use crate::ui::render::{FrameView, PeerPosition};

/// Navigation settings after merging config, deck file, and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSettings {
    /// Deck-wide controls for slides without their own value.
    pub keyboard_controls: KeyboardControls,
    /// Set by `--controls`; wins over per-slide values too.
    pub controls_override: Option<KeyboardControls>,
    pub animations_when_going_back: bool,
    pub debounce_window: Duration,
}

impl PresentationSettings {
    /// Deck file values override config; CLI flags override both.
    pub fn resolve(
        config: &PresentationConfig,
        deck: &DeckFile,
        controls_override: Option<KeyboardControls>,
        debounce_override: Option<Duration>,
    ) -> Self {
        Self {
            keyboard_controls: deck.keyboard_controls.unwrap_or(config.keyboard_controls),
            controls_override,
            animations_when_going_back: deck
                .animations_when_going_back
                .unwrap_or(config.animations_when_going_back),
            debounce_window: debounce_override
                .unwrap_or_else(|| config.debounce_window())
                .max(Duration::from_millis(1)),
        }
    }

    fn controls_for(&self, slide: Option<KeyboardControls>) -> KeyboardControls {
        self.controls_override
            .or(slide)
            .unwrap_or(self.keyboard_controls)
    }
}

/// What the loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A slide consumed the key.
    Consumed,
    Ignored,
    Quit,
}

/// Everything that decides what a frame looks like. The loop redraws when
/// this changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameKey {
    pub current: usize,
    pub element: SlideElementState,
    pub mirror: Option<PeerPosition>,
    pub size: (u16, u16),
}

/// One peer's view of a deck.
pub struct Presentation {
    title: String,
    deck: Deck,
    slides: Vec<Slide>,
    listeners: KeyListeners,
    keyboard: bool,
}

impl Presentation {
    /// Build a deck handle and one sequencer per slide, all bound to
    /// `channel`. With `keyboard == false` no key listener is ever attached.
    pub fn build(
        file: &DeckFile,
        settings: &PresentationSettings,
        display: &DisplayConfig,
        channel: Rc<dyn PresentationChannel>,
        keyboard: bool,
    ) -> Self {
        let deck = Deck::new(file.slides.len(), settings.animations_when_going_back);
        let context: Rc<dyn DeckContext> = Rc::new(deck.clone());
        let slides = file
            .slides
            .iter()
            .enumerate()
            .map(|(slide_num, spec)| {
                let options = SequencerOptions::new(slide_num, spec.elements.len())
                    .keyboard_controls(settings.controls_for(spec.keyboard_controls))
                    .debounce_window(settings.debounce_window);
                let sequencer =
                    SlideSequencer::new(options, Rc::clone(&context), Rc::clone(&channel));
                let code = spec
                    .code
                    .as_ref()
                    .map(|code| CodePane::from_spec(code, display));
                Slide::new(spec.title.clone(), spec.elements.clone(), code, sequencer)
            })
            .collect::<Vec<_>>();
        tracing::debug!(slides = slides.len(), keyboard, "presentation built");

        Self {
            title: file.title.clone(),
            deck,
            slides,
            listeners: KeyListeners::new(),
            keyboard,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> usize {
        self.deck.current_slide()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Current slide and element.
    pub fn position(&self) -> PeerPosition {
        let slide = self.current_slide();
        PeerPosition {
            slide,
            element: self
                .slides
                .get(slide)
                .and_then(|s| s.sequencer().state().current_slide_element),
        }
    }

    /// Attach the active slide's key listener and detach every other one.
    pub fn sync_keyboard(&self) {
        if !self.keyboard {
            return;
        }
        // Detach first so two listeners never coexist.
        for slide in &self.slides {
            if !slide.sequencer().is_active() {
                slide.sequencer().sync_keyboard(&self.listeners);
            }
        }
        for slide in &self.slides {
            if slide.sequencer().is_active() {
                slide.sequencer().sync_keyboard(&self.listeners);
            }
        }
    }

    /// Route one key through the slide listeners, then app-level keys.
    pub fn handle_key(&self, input: &KeyInput) -> KeyOutcome {
        self.sync_keyboard();
        let outcome = if self.listeners.dispatch(input) {
            KeyOutcome::Consumed
        } else if input.is_quit() {
            KeyOutcome::Quit
        } else {
            KeyOutcome::Ignored
        };
        self.sync_keyboard();
        outcome
    }

    pub fn frame_view(&self, mirror: Option<PeerPosition>) -> FrameView<'_> {
        FrameView {
            deck_title: &self.title,
            slides: &self.slides,
            current: self.current_slide(),
            mirror,
        }
    }

    pub fn frame_key(&self, mirror: Option<PeerPosition>, size: (u16, u16)) -> FrameKey {
        let current = self.current_slide();
        FrameKey {
            current,
            element: self
                .slides
                .get(current)
                .map(|slide| slide.sequencer().state())
                .unwrap_or_default(),
            mirror,
            size,
        }
    }

    /// Release every slide's listener, timer and channel handler.
    pub fn unmount(&self) {
        for slide in &self.slides {
            slide.sequencer().unmount();
        }
    }
}

impl std::fmt::Debug for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation")
            .field("title", &self.title)
            .field("deck", &self.deck.snapshot())
            .field("slides", &self.slides.len())
            .field("keyboard", &self.keyboard)
            .finish()
    }
}
