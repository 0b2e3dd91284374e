//! Semantic terminal theme system.
//!
//! Every presenter color resolves through a [`Theme`] so a custom
//! `[themes.<name>]` table can restyle the whole frame consistently.

use crossterm::style::Color;
use std::collections::BTreeMap;

/// Semantic color token used by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeToken {
    SlideTitle,
    TitleRule,
    ElementBullet,
    ElementText,
    MarkdownHeading,
    MarkdownCode,
    CodeBorder,
    StatusLine,
    StatusAccent,
    MirrorLabel,
    Warning,
    Error,
}

impl ThemeToken {
    /// Stable config key for this token (used by `[themes.<name>]` overrides).
    pub fn key(self) -> &'static str {
        match self {
            Self::SlideTitle => "slide_title",
            Self::TitleRule => "title_rule",
            Self::ElementBullet => "element_bullet",
            Self::ElementText => "element_text",
            Self::MarkdownHeading => "markdown_heading",
            Self::MarkdownCode => "markdown_code",
            Self::CodeBorder => "code_border",
            Self::StatusLine => "status_line",
            Self::StatusAccent => "status_accent",
            Self::MirrorLabel => "mirror_label",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    fn all() -> &'static [ThemeToken] {
        &[
            Self::SlideTitle,
            Self::TitleRule,
            Self::ElementBullet,
            Self::ElementText,
            Self::MarkdownHeading,
            Self::MarkdownCode,
            Self::CodeBorder,
            Self::StatusLine,
            Self::StatusAccent,
            Self::MirrorLabel,
            Self::Warning,
            Self::Error,
        ]
    }
}

/// Named theme resolved by token.
#[derive(Debug, Clone)]
pub struct Theme {
    /// User-facing theme name (`dark`, `light`, or custom key).
    pub name: String,
    colors: BTreeMap<ThemeToken, Color>,
}

impl Theme {
    /// Resolve a color for this theme.
    pub fn color(&self, token: ThemeToken) -> Color {
        self.colors
            .get(&token)
            .copied()
            .unwrap_or_else(|| dark_theme().color(token))
    }
}

impl Default for Theme {
    fn default() -> Self {
        dark_theme()
    }
}

/// Theme registry with built-ins and optional custom overrides.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// Build registry from built-ins plus custom `[themes.<name>]` overrides.
    ///
    /// Unknown token keys are ignored. A theme with an unparsable color is
    /// skipped with a warning; config loading rejects those up front.
    pub fn from_overrides(overrides: &BTreeMap<String, BTreeMap<String, String>>) -> Self {
        let mut themes = BTreeMap::new();
        let dark = dark_theme();
        let light = light_theme();
        themes.insert(dark.name.clone(), dark);
        themes.insert(light.name.clone(), light);

        for (name, values) in overrides {
            let normalized_name = normalize_theme_name(name);
            let base = themes
                .get(&normalized_name)
                .cloned()
                .unwrap_or_else(|| dark_theme_named(&normalized_name));
            match apply_theme_overrides(base, values) {
                Ok(custom) => {
                    themes.insert(normalized_name, custom);
                }
                Err(err) => tracing::warn!(theme = %name, %err, "skipping custom theme"),
            }
        }

        Self { themes }
    }

    /// Stable ordered names.
    pub fn names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    /// Resolve one theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(&normalize_theme_name(name))
    }

    /// Resolve `name`, falling back to `dark` when it is unknown.
    pub fn resolve(&self, name: &str) -> Theme {
        match self.get(name) {
            Some(theme) => theme.clone(),
            None => {
                tracing::warn!(
                    theme = %name,
                    available = %self.names().join(", "),
                    "unknown theme, using dark"
                );
                dark_theme()
            }
        }
    }
}

fn apply_theme_overrides(
    base: Theme,
    overrides: &BTreeMap<String, String>,
) -> Result<Theme, String> {
    let mut colors = base.colors;
    for (key, value) in overrides {
        let Some(token) = token_from_key(key) else {
            continue;
        };
        colors.insert(token, parse_color(value)?);
    }
    Ok(Theme {
        name: base.name,
        colors,
    })
}

fn token_from_key(key: &str) -> Option<ThemeToken> {
    let normalized = key.trim().to_ascii_lowercase();
    ThemeToken::all()
        .iter()
        .copied()
        .find(|token| token.key() == normalized)
}

fn normalize_theme_name(name: &str) -> String {
    let normalized = name.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        "dark".to_string()
    } else {
        normalized
    }
}

fn dark_theme_named(name: &str) -> Theme {
    Theme {
        name: name.to_string(),
        colors: dark_colors(),
    }
}

fn dark_theme() -> Theme {
    dark_theme_named("dark")
}

fn light_theme() -> Theme {
    Theme {
        name: "light".to_string(),
        colors: light_colors(),
    }
}

fn dark_colors() -> BTreeMap<ThemeToken, Color> {
    let base00 = rgb_color(0x65, 0x7b, 0x83);
    let base1 = rgb_color(0x93, 0xa1, 0xa1);
    let base2 = rgb_color(0xee, 0xe8, 0xd5);
    let yellow = rgb_color(0xb5, 0x89, 0x00);
    let orange = rgb_color(0xcb, 0x4b, 0x16);
    let red = rgb_color(0xdc, 0x32, 0x2f);
    let magenta = rgb_color(0xd3, 0x36, 0x82);
    let cyan = rgb_color(0x2a, 0xa1, 0x98);

    let mut map = BTreeMap::new();
    map.insert(ThemeToken::SlideTitle, cyan);
    map.insert(ThemeToken::TitleRule, base00);
    map.insert(ThemeToken::ElementBullet, orange);
    map.insert(ThemeToken::ElementText, base2);
    map.insert(ThemeToken::MarkdownHeading, rgb_color(0xc8, 0xe4, 0xbc));
    map.insert(ThemeToken::MarkdownCode, rgb_color(0xee, 0xe0, 0xbc));
    map.insert(ThemeToken::CodeBorder, base00);
    map.insert(ThemeToken::StatusLine, base00);
    map.insert(ThemeToken::StatusAccent, base1);
    map.insert(ThemeToken::MirrorLabel, magenta);
    map.insert(ThemeToken::Warning, yellow);
    map.insert(ThemeToken::Error, red);
    map
}

fn light_colors() -> BTreeMap<ThemeToken, Color> {
    let base0 = rgb_color(0x83, 0x94, 0x96);
    let base00 = rgb_color(0x65, 0x7b, 0x83);
    let base02 = rgb_color(0x07, 0x36, 0x42);
    let yellow = rgb_color(0xb5, 0x89, 0x00);
    let orange = rgb_color(0xcb, 0x4b, 0x16);
    let red = rgb_color(0xdc, 0x32, 0x2f);
    let magenta = rgb_color(0xd3, 0x36, 0x82);
    let blue = rgb_color(0x26, 0x8b, 0xd2);
    let green = rgb_color(0x85, 0x99, 0x00);

    let mut map = BTreeMap::new();
    map.insert(ThemeToken::SlideTitle, blue);
    map.insert(ThemeToken::TitleRule, base0);
    map.insert(ThemeToken::ElementBullet, orange);
    map.insert(ThemeToken::ElementText, base02);
    map.insert(ThemeToken::MarkdownHeading, green);
    map.insert(ThemeToken::MarkdownCode, orange);
    map.insert(ThemeToken::CodeBorder, base0);
    map.insert(ThemeToken::StatusLine, base0);
    map.insert(ThemeToken::StatusAccent, base00);
    map.insert(ThemeToken::MirrorLabel, magenta);
    map.insert(ThemeToken::Warning, yellow);
    map.insert(ThemeToken::Error, red);
    map
}

/// Parse `#RRGGBB` or a named terminal color.
pub fn parse_color(input: &str) -> Result<Color, String> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err("color value cannot be empty".to_string());
    }
    if let Some(hex) = normalized.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|_| format!("invalid hex color `{input}`"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|_| format!("invalid hex color `{input}`"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|_| format!("invalid hex color `{input}`"))?;
        return Ok(Color::Rgb { r, g, b });
    }

    let color = match normalized.as_str() {
        "black" => Color::Black,
        "darkgrey" | "dark-gray" | "dark_grey" => Color::DarkGrey,
        "grey" | "gray" => Color::Grey,
        "white" => Color::White,
        "red" => Color::Red,
        "darkred" | "dark-red" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" | "dark-green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" | "dark-yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" | "dark-blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" | "dark-magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" | "dark-cyan" => Color::DarkCyan,
        _ => return Err(format!("unsupported color value `{input}`")),
    };
    Ok(color)
}

fn rgb_color(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_builtin_themes() {
        let registry = ThemeRegistry::from_overrides(&BTreeMap::new());
        let names = registry.names();
        assert!(names.contains(&"dark".to_string()));
        assert!(names.contains(&"light".to_string()));
    }

    #[test]
    fn custom_override_applies() {
        let mut overrides = BTreeMap::new();
        let mut custom = BTreeMap::new();
        custom.insert("slide_title".to_string(), "#aabbcc".to_string());
        custom.insert("not_a_token".to_string(), "red".to_string());
        overrides.insert("Custom".to_string(), custom);
        let registry = ThemeRegistry::from_overrides(&overrides);
        let custom_theme = registry.get("custom").expect("custom theme should exist");
        assert_eq!(
            custom_theme.color(ThemeToken::SlideTitle),
            Color::Rgb {
                r: 0xaa,
                g: 0xbb,
                b: 0xcc
            }
        );
        assert_eq!(
            custom_theme.color(ThemeToken::Error),
            dark_theme().color(ThemeToken::Error)
        );
    }

    #[test]
    fn overriding_light_keeps_light_base() {
        let mut overrides = BTreeMap::new();
        let mut tweak = BTreeMap::new();
        tweak.insert("warning".to_string(), "red".to_string());
        overrides.insert("light".to_string(), tweak);
        let registry = ThemeRegistry::from_overrides(&overrides);
        let light = registry.get("light").expect("light");
        assert_eq!(light.color(ThemeToken::Warning), Color::Red);
        assert_eq!(
            light.color(ThemeToken::ElementText),
            light_theme().color(ThemeToken::ElementText)
        );
    }

    #[test]
    fn resolve_unknown_theme_falls_back_to_dark() {
        let registry = ThemeRegistry::from_overrides(&BTreeMap::new());
        assert_eq!(registry.resolve("missing").name, "dark");
        assert_eq!(registry.resolve(" LIGHT ").name, "light");
    }

    #[test]
    fn parse_color_supports_hex_and_names() {
        assert_eq!(
            parse_color("#010203").expect("hex"),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
        assert_eq!(parse_color("yellow").expect("named"), Color::Yellow);
        assert!(parse_color("#12").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("  ").is_err());
    }
}
