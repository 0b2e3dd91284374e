//! Frame rendering for the presenter.
//!
//! [`FrameRenderer`] draws one full frame (title, revealed elements, code
//! pane, status line) into any `Write`, so tests can render into a buffer.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::slide::Slide;
use crate::ui::markdown::render_markdown_lines;
use crate::ui::settings::{
    element_bullet, title_rule, FRAME_MARGIN_X, FRAME_MARGIN_Y, LABEL_MIRROR, STATUS_HINT,
    STATUS_SEPARATOR,
};
use crate::ui::theme::{Theme, ThemeToken};

/// Where a peer currently is in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerPosition {
    pub slide: usize,
    pub element: Option<usize>,
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub deck_title: &'a str,
    pub slides: &'a [Slide],
    pub current: usize,
    /// Audience replica position, when mirroring.
    pub mirror: Option<PeerPosition>,
}

/// Draws frames with one theme.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    theme: Theme,
    color: bool,
}

impl FrameRenderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    /// Draw a full frame sized `cols` x `rows`.
    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        view: &FrameView<'_>,
        (cols, rows): (u16, u16),
    ) -> io::Result<()> {
        queue!(out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
        let Some(slide) = view.slides.get(view.current) else {
            return out.flush();
        };

        let text_width = usize::from(cols.saturating_sub(FRAME_MARGIN_X * 2)).max(1);
        // Last row is reserved for the status line.
        let last_body_row = rows.saturating_sub(2);
        let mut row = FRAME_MARGIN_Y;

        let title = if slide.title.is_empty() {
            view.deck_title
        } else {
            slide.title.as_str()
        };
        queue!(out, MoveTo(FRAME_MARGIN_X, row))?;
        self.paint(out, ThemeToken::SlideTitle)?;
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(clip(title, text_width)),
            SetAttribute(Attribute::Reset)
        )?;
        row += 1;
        queue!(out, MoveTo(FRAME_MARGIN_X, row))?;
        self.paint(out, ThemeToken::TitleRule)?;
        queue!(
            out,
            Print(title_rule(self.color).to_string().repeat(text_width))
        )?;
        row += 2;

        let bullet = element_bullet(self.color);
        let bullet_width = bullet.chars().count() + 1;
        let element_width = text_width.saturating_sub(bullet_width).max(1);
        'elements: for element in slide.visible_elements() {
            for (index, line) in render_markdown_lines(element, element_width)
                .iter()
                .enumerate()
            {
                if row > last_body_row {
                    break 'elements;
                }
                queue!(out, MoveTo(FRAME_MARGIN_X, row))?;
                if index == 0 {
                    self.paint(out, ThemeToken::ElementBullet)?;
                    queue!(out, Print(format!("{bullet} ")))?;
                } else {
                    queue!(out, Print(" ".repeat(bullet_width)))?;
                }
                self.paint(out, ThemeToken::ElementText)?;
                queue!(out, Print(line))?;
                row += 1;
            }
        }

        if let Some(code) = &slide.code {
            row += 1;
            if row <= last_body_row {
                queue!(out, SetAttribute(Attribute::Reset), MoveTo(0, row))?;
                let room = usize::from(last_body_row - row + 1);
                code.render_clipped(out, usize::from(cols), room)?;
            }
        }

        queue!(
            out,
            SetAttribute(Attribute::Reset),
            MoveTo(FRAME_MARGIN_X, rows.saturating_sub(1))
        )?;
        self.paint(out, ThemeToken::StatusLine)?;
        queue!(out, Print(clip(&status_text(view, slide), text_width)))?;
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()
    }

    fn paint<W: Write>(&self, out: &mut W, token: ThemeToken) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(self.theme.color(token)))?;
        }
        Ok(())
    }
}

/// Status line: position, reveal progress, mirror position, hint.
pub fn status_text(view: &FrameView<'_>, slide: &Slide) -> String {
    let mut parts = vec![format!("slide {}/{}", view.current + 1, view.slides.len())];
    if !slide.elements.is_empty() {
        parts.push(format!(
            "{}/{}",
            slide.visible_elements().len(),
            slide.elements.len()
        ));
    }
    if let Some(mirror) = view.mirror {
        let element = mirror
            .element
            .map_or_else(|| "-".to_string(), |index| (index + 1).to_string());
        parts.push(format!("{LABEL_MIRROR} {}:{element}", mirror.slide + 1));
    }
    parts.push(STATUS_HINT.to_string());
    parts.join(STATUS_SEPARATOR)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
