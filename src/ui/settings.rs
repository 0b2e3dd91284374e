//! Centralized, hardcoded presenter layout settings.
//!
//! The single place to tweak glyphs, margins, and input polling.

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub const FRAME_MARGIN_X: u16 = 2;
pub const FRAME_MARGIN_Y: u16 = 1;
pub const FALLBACK_COLUMNS: u16 = 80;
pub const FALLBACK_ROWS: u16 = 24;
pub const CODE_PANE_PADDING: usize = 1;
pub const CODE_TAB_WIDTH: usize = 4;

// ---------------------------------------------------------------------------
// Glyphs / labels
// ---------------------------------------------------------------------------

pub const GLYPH_ELEMENT_BULLET: &str = "•";
pub const GLYPH_ELEMENT_BULLET_PLAIN: &str = "-";
pub const GLYPH_TITLE_RULE: char = '─';
pub const GLYPH_TITLE_RULE_PLAIN: char = '-';
pub const LABEL_MIRROR: &str = "audience";
pub const STATUS_SEPARATOR: &str = "  ·  ";
pub const STATUS_HINT: &str = "q quit";

// ---------------------------------------------------------------------------
// Input / redraw
// ---------------------------------------------------------------------------

/// Poll interval of the blocking key reader.
pub const KEY_POLL_MS: u64 = 80;
/// Redraw tick while idle, so debounced steps and mirror updates show up.
pub const REDRAW_TICK_MS: u64 = 50;
/// Capacity of the key channel between the reader and the presenter loop.
pub const KEY_CHANNEL_CAPACITY: usize = 64;

pub fn element_bullet(color: bool) -> &'static str {
    if color {
        GLYPH_ELEMENT_BULLET
    } else {
        GLYPH_ELEMENT_BULLET_PLAIN
    }
}

pub fn title_rule(color: bool) -> char {
    if color {
        GLYPH_TITLE_RULE
    } else {
        GLYPH_TITLE_RULE_PLAIN
    }
}
