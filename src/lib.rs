//! Slidekit: terminal slide decks with element-by-element reveal.
//!
//! Each slide owns a small state machine that reveals its elements one at a
//! time and hands control to the deck at either end. Navigation is mirrored
//! to other peers (an audience screen) over a sync channel, and rapid
//! "next" presses are coalesced into a single immediate step.
//!
//! # Quick start
//!
//! ```no_run
//! use std::rc::Rc;
//! use slidekit::config::{DisplayConfig, PresentationConfig};
//! use slidekit::deck::parse_deck;
//! use slidekit::presenter::{Presentation, PresentationSettings};
//! use slidekit::sync::LocalBus;
//!
//! let file = parse_deck("[[slides]]\nelements = [\"hello\"]\n").unwrap();
//! let settings =
//!     PresentationSettings::resolve(&PresentationConfig::default(), &file, None, None);
//! let bus = LocalBus::new();
//! let peer = Rc::new(bus.connect());
//! let presentation =
//!     Presentation::build(&file, &settings, &DisplayConfig::default(), peer, true);
//! presentation.sync_keyboard();
//! ```

pub mod build_info;
pub mod config;
pub mod deck;
pub mod error;
pub mod input;
pub mod presenter;
pub mod slide;
pub mod sync;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
