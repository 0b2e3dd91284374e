//! `slidekit check`: validate a deck and print its outline.

use slidekit::config::DisplayConfig;
use slidekit::deck::DeckFile;
use slidekit::presenter::PresentationSettings;
use slidekit::ui::code_pane::CodePane;

/// One line per slide: number, title, element count, controls, code pane.
pub(crate) fn deck_outline(
    deck: &DeckFile,
    settings: &PresentationSettings,
    display: &DisplayConfig,
) -> String {
    let title = if deck.title.is_empty() {
        "(untitled)"
    } else {
        deck.title.as_str()
    };
    let mut lines = vec![format!("{title}: {} slides", deck.slides.len())];
    for (index, slide) in deck.slides.iter().enumerate() {
        let elements = match slide.elements.len() {
            1 => "1 element".to_string(),
            n => format!("{n} elements"),
        };
        let controls = settings
            .controls_override
            .or(slide.keyboard_controls)
            .unwrap_or(settings.keyboard_controls);
        let mut details = vec![elements, controls.as_str().to_string()];
        if let Some(code) = &slide.code {
            let pane = CodePane::from_spec(code, display);
            details.push(format!("code: {}", pane.syntax_name()));
        }
        let slide_title = if slide.title.is_empty() {
            "(untitled)"
        } else {
            slide.title.as_str()
        };
        lines.push(format!(
            "  {}. {slide_title}  [{}]",
            index + 1,
            details.join(", ")
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidekit::config::PresentationConfig;
    use slidekit::deck::parse_deck;

    #[test]
    fn outline_lists_every_slide() {
        let deck = parse_deck(
            r#"
title = "Talk"

[[slides]]
title = "Intro"
elements = ["hello"]

[[slides]]
keyboard_controls = "space"
elements = ["a", "b"]

[slides.code]
language = "rs"
source = "fn main() {}"
"#,
        )
        .expect("deck");
        let settings =
            PresentationSettings::resolve(&PresentationConfig::default(), &deck, None, None);
        let outline = deck_outline(&deck, &settings, &DisplayConfig::default());
        assert_eq!(
            outline,
            "Talk: 2 slides\n  1. Intro  [1 element, arrows]\n  2. (untitled)  [2 elements, space, code: Rust]"
        );
    }
}
