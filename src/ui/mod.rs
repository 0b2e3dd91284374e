//! Terminal-facing presentation layer.
//!
//! Theme resolution, markdown layout, code highlighting and frame drawing
//! live here so the slide/deck state machines stay free of terminal types.

pub mod code_pane;
pub mod markdown;
pub mod render;
pub mod settings;
pub mod terminal;
pub mod theme;
