//! Theme tokens and variant resolution.
//!
//! A [`Theme`] maps token names (`primary`, `base_100`, `error_content`, ...)
//! to colors or attribute sets. Widgets declare a *variant* token and
//! [`Theme::resolve`] turns it into a [`StyleResolved`], folding in the
//! node's interaction state. Missing tokens never fail: they resolve to the
//! terminal's default colors.

use std::collections::HashMap;

use crate::style::{Attributes, Color, StyleResolved};

/// Percentage used to shift the background of a hovered node.
const HOVER_SHIFT: f32 = 0.15;

// ---------------------------------------------------------------------------
// ThemeValue
// ---------------------------------------------------------------------------

/// The value stored under a theme token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeValue {
    Color(Color),
    Attrs(Attributes),
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

/// Per-node interaction flags that modify a resolved style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    pub focused: bool,
    pub disabled: bool,
}

impl Interaction {
    /// Attributes implied by focus (bold) and disabled (dim).
    pub fn attrs(self) -> Attributes {
        let mut attrs = Attributes::empty();
        if self.focused {
            attrs |= Attributes::BOLD;
        }
        if self.disabled {
            attrs |= Attributes::DIM;
        }
        attrs
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Seed colors for building a complete theme.
///
/// Only `primary` is required. Every other slot falls back along a fixed
/// chain (secondary to primary, accent to secondary, and so on) and every
/// missing `*_content` color is derived from the luminance of its base.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub primary: Color,
    pub primary_content: Option<Color>,
    pub secondary: Option<Color>,
    pub secondary_content: Option<Color>,
    pub accent: Option<Color>,
    pub accent_content: Option<Color>,
    pub neutral: Option<Color>,
    pub neutral_content: Option<Color>,
    pub base_100: Option<Color>,
    pub base_200: Option<Color>,
    pub base_300: Option<Color>,
    pub base_content: Option<Color>,
    pub info: Option<Color>,
    pub info_content: Option<Color>,
    pub success: Option<Color>,
    pub success_content: Option<Color>,
    pub warning: Option<Color>,
    pub warning_content: Option<Color>,
    pub error: Option<Color>,
    pub error_content: Option<Color>,
}

impl Palette {
    pub fn new(primary: Color) -> Self {
        Self { primary, ..Self::default() }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Names of the themes returned by [`Theme::builtin`].
pub const BUILTIN_THEMES: &[&str] = &[
    "dark",
    "light",
    "one-dark",
    "catppuccin-latte",
    "catppuccin-mocha",
    "dracula",
    "tokyo-night",
    "monokai",
];

/// A named token-to-value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Dark themes lighten hovered backgrounds; light themes darken them.
    pub dark: bool,
    tokens: HashMap<String, ThemeValue>,
}

impl Theme {
    /// An empty theme. Every variant resolves to the default style.
    pub fn new(name: impl Into<String>, dark: bool) -> Self {
        Self { name: name.into(), dark, tokens: HashMap::new() }
    }

    /// Set a color token (builder).
    pub fn with_color(mut self, token: impl Into<String>, color: Color) -> Self {
        self.set(token, ThemeValue::Color(color));
        self
    }

    /// Set an attribute token (builder), e.g. `"primary_attrs"`.
    pub fn with_attrs(mut self, token: impl Into<String>, attrs: Attributes) -> Self {
        self.set(token, ThemeValue::Attrs(attrs));
        self
    }

    pub fn set(&mut self, token: impl Into<String>, value: ThemeValue) {
        self.tokens.insert(token.into(), value);
    }

    pub fn get(&self, token: &str) -> Option<ThemeValue> {
        self.tokens.get(token).copied()
    }

    /// The color stored under `token`, if it is a color.
    pub fn color(&self, token: &str) -> Option<Color> {
        match self.tokens.get(token) {
            Some(ThemeValue::Color(c)) => Some(*c),
            _ => None,
        }
    }

    /// The attributes stored under `token`, if they are attributes.
    pub fn attrs(&self, token: &str) -> Option<Attributes> {
        match self.tokens.get(token) {
            Some(ThemeValue::Attrs(a)) => Some(*a),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Build a theme with all twenty color tokens filled from `palette`.
    pub fn from_palette(name: impl Into<String>, dark: bool, p: Palette) -> Self {
        let primary = p.primary;
        let secondary = p.secondary.unwrap_or(primary);
        let accent = p.accent.unwrap_or(secondary);
        let neutral = p.neutral.unwrap_or(secondary);
        let base_100 = p.base_100.unwrap_or(primary);
        let base_200 = p.base_200.unwrap_or(secondary);
        let base_300 = p.base_300.unwrap_or(accent);
        let info = p.info.unwrap_or(primary);
        let success = p.success.unwrap_or(primary);
        let warning = p.warning.unwrap_or(primary);
        let error = p.error.unwrap_or(secondary);

        let entries = [
            ("primary", primary),
            ("primary_content", p.primary_content.unwrap_or(primary.content_color())),
            ("secondary", secondary),
            ("secondary_content", p.secondary_content.unwrap_or(secondary.content_color())),
            ("accent", accent),
            ("accent_content", p.accent_content.unwrap_or(accent.content_color())),
            ("neutral", neutral),
            ("neutral_content", p.neutral_content.unwrap_or(neutral.content_color())),
            ("base_100", base_100),
            ("base_200", base_200),
            ("base_300", base_300),
            ("base_content", p.base_content.unwrap_or(base_100.content_color())),
            ("info", info),
            ("info_content", p.info_content.unwrap_or(info.content_color())),
            ("success", success),
            ("success_content", p.success_content.unwrap_or(success.content_color())),
            ("warning", warning),
            ("warning_content", p.warning_content.unwrap_or(warning.content_color())),
            ("error", error),
            ("error_content", p.error_content.unwrap_or(error.content_color())),
        ];

        let mut theme = Theme::new(name, dark);
        for (token, color) in entries {
            theme.set(token, ThemeValue::Color(color));
        }
        theme
    }

    /// Look up one of the built-in themes by name.
    pub fn builtin(name: &str) -> Option<Theme> {
        let rgb = |r, g, b| Some(Color::Rgb(r, g, b));
        let theme = match name {
            "dark" => Theme::from_palette("dark", true, Palette {
                primary: Color::Rgb(94, 100, 224),
                primary_content: rgb(238, 240, 255),
                secondary: rgb(217, 95, 187),
                secondary_content: rgb(237, 228, 240),
                accent: rgb(100, 213, 198),
                accent_content: rgb(67, 105, 103),
                neutral: rgb(28, 31, 48),
                neutral_content: rgb(227, 230, 240),
                base_100: rgb(55, 58, 79),
                base_200: rgb(50, 53, 72),
                base_300: rgb(46, 48, 66),
                base_content: rgb(247, 248, 253),
                info: rgb(118, 176, 245),
                info_content: rgb(50, 73, 108),
                success: rgb(106, 218, 155),
                success_content: rgb(61, 107, 81),
                warning: rgb(239, 210, 99),
                warning_content: rgb(128, 97, 56),
                error: rgb(235, 119, 101),
                error_content: rgb(87, 52, 49),
            }),
            "light" => Theme::from_palette("light", false, Palette {
                primary: Color::Rgb(61, 56, 184),
                primary_content: rgb(227, 230, 252),
                secondary: rgb(217, 95, 187),
                secondary_content: rgb(237, 228, 240),
                accent: rgb(100, 213, 198),
                accent_content: rgb(67, 105, 103),
                neutral: rgb(28, 31, 48),
                neutral_content: rgb(227, 230, 240),
                base_100: rgb(255, 255, 255),
                base_200: rgb(250, 250, 250),
                base_300: rgb(242, 242, 242),
                base_content: rgb(46, 48, 58),
                info: rgb(118, 176, 245),
                info_content: rgb(50, 73, 108),
                success: rgb(106, 218, 155),
                success_content: rgb(61, 107, 81),
                warning: rgb(239, 210, 99),
                warning_content: rgb(128, 97, 56),
                error: rgb(235, 119, 101),
                error_content: rgb(87, 52, 49),
            }),
            "one-dark" => Theme::from_palette("one-dark", true, Palette {
                primary: Color::Rgb(97, 175, 239),
                primary_content: rgb(40, 44, 52),
                secondary: rgb(198, 120, 221),
                secondary_content: rgb(40, 44, 52),
                accent: rgb(86, 182, 194),
                accent_content: rgb(40, 44, 52),
                neutral: rgb(33, 37, 43),
                neutral_content: rgb(171, 178, 191),
                base_100: rgb(40, 44, 52),
                base_200: rgb(33, 37, 43),
                base_300: rgb(26, 29, 36),
                base_content: rgb(171, 178, 191),
                info: rgb(97, 175, 239),
                info_content: rgb(40, 44, 52),
                success: rgb(152, 195, 121),
                success_content: rgb(40, 44, 52),
                warning: rgb(229, 192, 123),
                warning_content: rgb(40, 44, 52),
                error: rgb(224, 108, 117),
                error_content: rgb(40, 44, 52),
            }),
            "catppuccin-latte" => Theme::from_palette("catppuccin-latte", false, Palette {
                primary: Color::Rgb(30, 102, 245),
                primary_content: rgb(239, 241, 245),
                secondary: rgb(136, 57, 239),
                secondary_content: rgb(239, 241, 245),
                accent: rgb(4, 165, 229),
                accent_content: rgb(239, 241, 245),
                neutral: rgb(204, 208, 218),
                neutral_content: rgb(76, 79, 105),
                base_100: rgb(239, 241, 245),
                base_200: rgb(230, 233, 239),
                base_300: rgb(220, 224, 232),
                base_content: rgb(76, 79, 105),
                info: rgb(30, 102, 245),
                info_content: rgb(239, 241, 245),
                success: rgb(64, 160, 43),
                success_content: rgb(239, 241, 245),
                warning: rgb(223, 142, 29),
                warning_content: rgb(239, 241, 245),
                error: rgb(210, 15, 57),
                error_content: rgb(239, 241, 245),
            }),
            "catppuccin-mocha" => Theme::from_palette("catppuccin-mocha", true, Palette {
                primary: Color::Rgb(137, 180, 250),
                primary_content: rgb(30, 30, 46),
                secondary: rgb(203, 166, 247),
                secondary_content: rgb(30, 30, 46),
                accent: rgb(116, 199, 236),
                accent_content: rgb(30, 30, 46),
                neutral: rgb(49, 50, 68),
                neutral_content: rgb(205, 214, 244),
                base_100: rgb(30, 30, 46),
                base_200: rgb(24, 24, 37),
                base_300: rgb(17, 17, 27),
                base_content: rgb(205, 214, 244),
                info: rgb(137, 180, 250),
                info_content: rgb(30, 30, 46),
                success: rgb(166, 227, 161),
                success_content: rgb(30, 30, 46),
                warning: rgb(249, 226, 175),
                warning_content: rgb(30, 30, 46),
                error: rgb(243, 139, 168),
                error_content: rgb(30, 30, 46),
            }),
            "dracula" => Theme::from_palette("dracula", true, Palette {
                primary: Color::Rgb(139, 233, 253),
                primary_content: rgb(40, 42, 54),
                secondary: rgb(255, 121, 198),
                secondary_content: rgb(40, 42, 54),
                accent: rgb(189, 147, 249),
                accent_content: rgb(40, 42, 54),
                neutral: rgb(68, 71, 90),
                neutral_content: rgb(248, 248, 242),
                base_100: rgb(40, 42, 54),
                base_200: rgb(68, 71, 90),
                base_300: rgb(98, 114, 164),
                base_content: rgb(248, 248, 242),
                info: rgb(139, 233, 253),
                info_content: rgb(40, 42, 54),
                success: rgb(80, 250, 123),
                success_content: rgb(40, 42, 54),
                warning: rgb(241, 250, 140),
                warning_content: rgb(40, 42, 54),
                error: rgb(255, 85, 85),
                error_content: rgb(40, 42, 54),
            }),
            "tokyo-night" => Theme::from_palette("tokyo-night", true, Palette {
                primary: Color::Rgb(125, 207, 255),
                primary_content: rgb(26, 27, 38),
                secondary: rgb(187, 154, 247),
                secondary_content: rgb(26, 27, 38),
                accent: rgb(115, 218, 202),
                accent_content: rgb(26, 27, 38),
                neutral: rgb(55, 56, 70),
                neutral_content: rgb(169, 177, 214),
                base_100: rgb(26, 27, 38),
                base_200: rgb(22, 22, 30),
                base_300: rgb(18, 18, 25),
                base_content: rgb(169, 177, 214),
                info: rgb(125, 207, 255),
                info_content: rgb(26, 27, 38),
                success: rgb(158, 206, 106),
                success_content: rgb(26, 27, 38),
                warning: rgb(224, 175, 104),
                warning_content: rgb(26, 27, 38),
                error: rgb(247, 118, 142),
                error_content: rgb(26, 27, 38),
            }),
            "monokai" => Theme::from_palette("monokai", true, Palette {
                primary: Color::Rgb(102, 217, 239),
                primary_content: rgb(39, 40, 34),
                secondary: rgb(174, 129, 255),
                secondary_content: rgb(39, 40, 34),
                accent: rgb(255, 216, 102),
                accent_content: rgb(39, 40, 34),
                neutral: rgb(73, 72, 62),
                neutral_content: rgb(248, 248, 242),
                base_100: rgb(39, 40, 34),
                base_200: rgb(73, 72, 62),
                base_300: rgb(117, 113, 94),
                base_content: rgb(248, 248, 242),
                info: rgb(102, 217, 239),
                info_content: rgb(39, 40, 34),
                success: rgb(166, 226, 46),
                success_content: rgb(39, 40, 34),
                warning: rgb(255, 216, 102),
                warning_content: rgb(39, 40, 34),
                error: rgb(249, 38, 114),
                error_content: rgb(39, 40, 34),
            }),
            _ => return None,
        };
        Some(theme)
    }

    /// Resolve a variant token into a concrete style.
    ///
    /// The background comes from `variant`, the foreground from
    /// `{variant}_content` (`base_content` for the `base_*` family) and any
    /// extra attributes from `{variant}_attrs`. Interaction flags then shift
    /// the background (hover), add bold (focus) or dim (disabled).
    pub fn resolve(&self, variant: &str, interaction: Interaction) -> StyleResolved {
        let bg = self.color(variant).unwrap_or_default();
        let fg = if variant.starts_with("base_") {
            self.color("base_content")
        } else {
            self.color(&format!("{variant}_content"))
        }
        .unwrap_or_default();
        let attrs = self.attrs(&format!("{variant}_attrs")).unwrap_or_default();

        let mut style = StyleResolved::new(fg, bg, attrs);
        if interaction.hovered {
            style.bg = if self.dark { bg.lighten(HOVER_SHIFT) } else { bg.darken(HOVER_SHIFT) };
        }
        style.attrs |= interaction.attrs();
        style
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::builtin("dark").unwrap_or_else(|| Theme::new("dark", true))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Palette fallbacks
    // -----------------------------------------------------------------------

    #[test]
    fn palette_fills_all_twenty_tokens() {
        let theme = Theme::from_palette("mono", true, Palette::new(Color::Rgb(10, 20, 30)));
        assert_eq!(theme.len(), 20);
    }

    #[test]
    fn palette_fallback_chain() {
        let mut p = Palette::new(Color::Rgb(1, 1, 1));
        p.secondary = Some(Color::Rgb(2, 2, 2));
        let theme = Theme::from_palette("t", true, p);
        assert_eq!(theme.color("accent"), Some(Color::Rgb(2, 2, 2)));
        assert_eq!(theme.color("base_100"), Some(Color::Rgb(1, 1, 1)));
        assert_eq!(theme.color("base_300"), Some(Color::Rgb(2, 2, 2)));
        assert_eq!(theme.color("error"), Some(Color::Rgb(2, 2, 2)));
        assert_eq!(theme.color("primary_content"), Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn every_builtin_exists_and_is_complete() {
        for name in BUILTIN_THEMES {
            let theme = Theme::builtin(name).unwrap();
            assert_eq!(theme.name, *name);
            assert_eq!(theme.len(), 20, "{name}");
        }
        assert!(Theme::builtin("solarized").is_none());
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    #[test]
    fn resolve_uses_variant_and_content_pair() {
        let theme = Theme::builtin("dark").unwrap();
        let style = theme.resolve("primary", Interaction::default());
        assert_eq!(style.bg, Color::Rgb(94, 100, 224));
        assert_eq!(style.fg, Color::Rgb(238, 240, 255));
        assert_eq!(style.attrs, Attributes::empty());
    }

    #[test]
    fn base_variants_share_base_content() {
        let theme = Theme::builtin("dark").unwrap();
        let style = theme.resolve("base_200", Interaction::default());
        assert_eq!(style.bg, Color::Rgb(50, 53, 72));
        assert_eq!(style.fg, Color::Rgb(247, 248, 253));
    }

    #[test]
    fn missing_token_falls_back_to_default_style() {
        let theme = Theme::builtin("dark").unwrap();
        let style = theme.resolve("sparkle", Interaction::default());
        assert_eq!(style, StyleResolved::default());
    }

    #[test]
    fn attrs_token_is_applied() {
        let theme = Theme::new("t", true)
            .with_color("warning", Color::Ansi(3))
            .with_attrs("warning_attrs", Attributes::UNDERLINE);
        let style = theme.resolve("warning", Interaction::default());
        assert_eq!(style.attrs, Attributes::UNDERLINE);
    }

    #[test]
    fn interaction_modifiers() {
        let dark = Theme::new("d", true).with_color("primary", Color::Rgb(100, 100, 100));
        let light = Theme::new("l", false).with_color("primary", Color::Rgb(100, 100, 100));

        let hovered = Interaction { hovered: true, ..Interaction::default() };
        assert_eq!(dark.resolve("primary", hovered).bg, Color::Rgb(115, 115, 115));
        assert_eq!(light.resolve("primary", hovered).bg, Color::Rgb(85, 85, 85));

        let focused = Interaction { focused: true, ..Interaction::default() };
        assert!(dark.resolve("primary", focused).attrs.contains(Attributes::BOLD));

        let disabled = Interaction { disabled: true, ..Interaction::default() };
        assert!(dark.resolve("primary", disabled).attrs.contains(Attributes::DIM));
    }
}
