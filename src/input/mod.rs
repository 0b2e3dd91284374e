//! Keyboard input model and the global key-listener registry.
//!
//! Terminal events are converted into [`KeyInput`] once, at the edge, so
//! slides never depend on crossterm types directly.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

mod listeners;

pub use listeners::{KeyHandler, KeyListenerGuard, KeyListeners};

/// Logical key, named after what slides care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Escape,
    Char(char),
    Other,
}

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }

    /// Convert a crossterm key event. Releases and repeats are ignored.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let key = match event.code {
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        };
        Some(Self {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        })
    }

    /// Keys that end the presentation when no slide consumed them.
    pub fn is_quit(&self) -> bool {
        match self.key {
            Key::Escape | Key::Char('q') => !self.ctrl,
            Key::Char('c') => self.ctrl,
            _ => false,
        }
    }
}

/// Keyboard control mode of a slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyboardControls {
    /// Left goes back, Right goes forward.
    #[default]
    Arrows,
    /// Space goes forward only and is consumed.
    Space,
    /// Any other configured value: keyboard handling is off.
    Disabled,
}

impl KeyboardControls {
    /// Lenient parse; unsupported values disable keyboard handling.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "arrows" => Self::Arrows,
            "space" => Self::Space,
            _ => Self::Disabled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arrows => "arrows",
            Self::Space => "space",
            Self::Disabled => "disabled",
        }
    }
}

impl Serialize for KeyboardControls {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KeyboardControls {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
