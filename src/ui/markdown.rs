//! Markdown-to-terminal rendering for slide elements.
//!
//! `termimad` lays out lists, headings, code fences and quotes. Output
//! carries no ANSI styling; the frame renderer applies theme colors.

use termimad::MadSkin;

/// Render markdown into plain terminal lines wrapped to `width` columns.
pub fn render_markdown_lines(input: &str, width: usize) -> Vec<String> {
    let skin = MadSkin::no_style();
    let width = width.max(1);
    let formatted = skin.text(input, Some(width)).to_string();
    formatted
        .trim_end_matches('\n')
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_list_layout() {
        let lines = render_markdown_lines("# Title\n\n- a\n- b", 40);
        let joined = lines.join("\n");
        assert!(joined.contains("Title"));
        assert!(joined.contains('a'));
        assert!(joined.contains('b'));
    }

    #[test]
    fn keeps_code_content() {
        let lines = render_markdown_lines("```rust\nfn main() {}\n```", 40);
        assert!(lines.iter().any(|line| line.contains("fn main() {}")));
    }

    #[test]
    fn wraps_to_width() {
        let lines = render_markdown_lines("one two three four five six seven eight", 12);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= 12));
    }
}
