//! Read-only syntax-highlighted code pane.
//!
//! Highlighting uses syntect's bundled syntaxes and themes. The pane is
//! display-only: there is no editing and no execution.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::{DisplayConfig, DEFAULT_CODE_THEME};
use crate::deck::CodeSpec;
use crate::ui::settings::{CODE_PANE_PADDING, CODE_TAB_WIDTH};
use crate::ui::theme::parse_color;

/// A highlighted text fragment with display attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken {
    pub text: String,
    /// RGB foreground color.
    pub rgb: (u8, u8, u8),
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Requested theme, else the default one, else any bundled theme.
fn resolve_theme<'a>(theme_set: &'a ThemeSet, name: &str) -> Option<&'a Theme> {
    theme_set
        .themes
        .get(name)
        .or_else(|| theme_set.themes.get(DEFAULT_CODE_THEME))
        .or_else(|| theme_set.themes.values().next())
}

fn resolve_syntax<'a>(syntaxes: &'a SyntaxSet, language: Option<&str>) -> &'a SyntaxReference {
    language
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .and_then(|lang| {
            syntaxes
                .find_syntax_by_token(lang)
                .or_else(|| syntaxes.find_syntax_by_extension(lang))
        })
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text())
}

/// Code block with its presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CodePane {
    pub code: String,
    /// Syntax token or file extension; plain text when absent or unknown.
    pub language: Option<String>,
    pub background: Color,
    /// syntect theme name.
    pub theme: String,
}

impl CodePane {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: None,
            background: Color::Black,
            theme: DEFAULT_CODE_THEME.to_string(),
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the background from `#RRGGBB` or a color name. Invalid values
    /// fall back to black.
    pub fn background(mut self, value: &str) -> Self {
        self.background = match parse_color(value) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(%err, "invalid code pane background, using black");
                Color::Black
            }
        };
        self
    }

    /// Build from a deck entry, filling gaps from the display config.
    pub fn from_spec(spec: &CodeSpec, display: &DisplayConfig) -> Self {
        let mut pane = Self::new(spec.source.clone())
            .theme(spec.theme.as_deref().unwrap_or(&display.code_theme))
            .background(
                spec.background
                    .as_deref()
                    .unwrap_or(&display.code_background),
            );
        pane.language = spec.language.clone();
        pane
    }

    /// Display name of the syntax the pane will highlight with.
    pub fn syntax_name(&self) -> &'static str {
        resolve_syntax(syntax_set(), self.language.as_deref())
            .name
            .as_str()
    }

    /// Highlight every line of the code.
    ///
    /// Falls back to unstyled tokens if the theme is missing or a line
    /// fails to highlight.
    pub fn highlight(&self) -> Vec<Vec<StyledToken>> {
        let syntaxes = syntax_set();
        let syntax = resolve_syntax(syntaxes, self.language.as_deref());
        let Some(theme) = resolve_theme(theme_set(), &self.theme) else {
            return self.plain_rows();
        };
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut rows = Vec::new();

        for line in LinesWithEndings::from(&self.code) {
            let Ok(ranges) = highlighter.highlight_line(line, syntaxes) else {
                tracing::debug!(syntax = %syntax.name, "highlighting failed, rendering plain");
                return self.plain_rows();
            };
            let mut tokens = Vec::with_capacity(ranges.len());
            for (style, fragment) in ranges {
                let text = fragment.trim_end_matches(['\n', '\r']);
                if text.is_empty() {
                    continue;
                }
                tokens.push(StyledToken {
                    text: text.to_string(),
                    rgb: (style.foreground.r, style.foreground.g, style.foreground.b),
                    bold: style.font_style.contains(FontStyle::BOLD),
                    italic: style.font_style.contains(FontStyle::ITALIC),
                    underline: style.font_style.contains(FontStyle::UNDERLINE),
                });
            }
            rows.push(tokens);
        }
        rows
    }

    fn plain_rows(&self) -> Vec<Vec<StyledToken>> {
        self.code
            .lines()
            .map(|line| {
                vec![StyledToken {
                    text: line.to_string(),
                    rgb: (0xee, 0xee, 0xee),
                    bold: false,
                    italic: false,
                    underline: false,
                }]
            })
            .collect()
    }

    /// Write the pane: every row filled with the background color and
    /// clipped or padded to `width` columns. Rows end with `\r\n`.
    pub fn render<W: Write>(&self, out: &mut W, width: usize) -> io::Result<()> {
        self.render_clipped(out, width, usize::MAX)
    }

    /// Like [`CodePane::render`], writing at most `max_rows` rows.
    pub fn render_clipped<W: Write>(
        &self,
        out: &mut W,
        width: usize,
        max_rows: usize,
    ) -> io::Result<()> {
        let inner = width.saturating_sub(CODE_PANE_PADDING * 2);
        for row in self.highlight().into_iter().take(max_rows) {
            queue!(
                out,
                SetAttribute(Attribute::Reset),
                SetBackgroundColor(self.background),
                Print(" ".repeat(CODE_PANE_PADDING.min(width)))
            )?;
            let mut used = 0usize;
            for token in row {
                if used >= inner {
                    break;
                }
                let text = token.text.replace('\t', &" ".repeat(CODE_TAB_WIDTH));
                let visible: String = text.chars().take(inner - used).collect();
                used += visible.chars().count();
                let (r, g, b) = token.rgb;
                queue!(
                    out,
                    SetAttribute(Attribute::Reset),
                    SetBackgroundColor(self.background),
                    SetForegroundColor(Color::Rgb { r, g, b })
                )?;
                if token.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if token.italic {
                    queue!(out, SetAttribute(Attribute::Italic))?;
                }
                if token.underline {
                    queue!(out, SetAttribute(Attribute::Underlined))?;
                }
                queue!(out, Print(visible))?;
            }
            let fill = width.saturating_sub(used + CODE_PANE_PADDING.min(width));
            queue!(
                out,
                SetAttribute(Attribute::Reset),
                SetBackgroundColor(self.background),
                Print(" ".repeat(fill)),
                SetAttribute(Attribute::Reset),
                Print("\r\n")
            )?;
        }
        Ok(())
    }
}
