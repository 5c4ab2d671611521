//! Style primitives: colors, text attributes, resolved styles, and cells.
//!
//! A [`Cell`] is the unit stored in a frame: one character plus the
//! foreground, background and attribute bitset it is drawn with.

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's own default foreground/background.
    #[default]
    Default,
    /// One of the 256 indexed palette colors.
    Ansi(u8),
    /// A 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color string.
    ///
    /// Supports `#rrggbb`, `#rgb`, `default`, and the sixteen standard names
    /// (`red`, `bright_blue`, `grey`, ...). Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let index = match s.to_ascii_lowercase().as_str() {
            "default" | "reset" => return Some(Color::Default),
            "black" => 0,
            "red" => 1,
            "green" => 2,
            "yellow" => 3,
            "blue" => 4,
            "magenta" => 5,
            "cyan" => 6,
            "white" | "grey" | "gray" => 7,
            "bright_black" | "dark_grey" | "dark_gray" => 8,
            "bright_red" => 9,
            "bright_green" => 10,
            "bright_yellow" => 11,
            "bright_blue" => 12,
            "bright_magenta" => 13,
            "bright_cyan" => 14,
            "bright_white" => 15,
            _ => return None,
        };
        Some(Color::Ansi(index))
    }

    /// Scale each channel up by `percent` (0.0..=1.0), saturating at 255.
    ///
    /// Only RGB colors change; indexed and default colors are returned as is.
    pub fn lighten(self, percent: f32) -> Color {
        let p = percent.clamp(0.0, 1.0);
        match self {
            Color::Rgb(r, g, b) => {
                let up = |c: u8| (c as f32 + c as f32 * p).round().min(255.0) as u8;
                Color::Rgb(up(r), up(g), up(b))
            }
            other => other,
        }
    }

    /// Scale each channel down by `percent` (0.0..=1.0), saturating at 0.
    pub fn darken(self, percent: f32) -> Color {
        let p = percent.clamp(0.0, 1.0);
        match self {
            Color::Rgb(r, g, b) => {
                let down = |c: u8| (c as f32 - c as f32 * p).round().max(0.0) as u8;
                Color::Rgb(down(r), down(g), down(b))
            }
            other => other,
        }
    }

    /// Relative luminance in 0.0..=1.0 for RGB colors, `None` otherwise.
    pub fn luminance(self) -> Option<f32> {
        match self {
            Color::Rgb(r, g, b) => {
                Some((0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32) / 255.0)
            }
            _ => None,
        }
    }

    /// A readable text color to draw on top of this one.
    pub fn content_color(self) -> Color {
        match self.luminance() {
            Some(l) if l > 0.5 => Color::Rgb(0, 0, 0),
            Some(_) => Color::Rgb(255, 255, 255),
            None => Color::Default,
        }
    }
}

/// Parse a hex color body (without `#`).
fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

bitflags! {
    /// Text attributes applied to a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const REVERSE       = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

// ---------------------------------------------------------------------------
// StyleResolved
// ---------------------------------------------------------------------------

/// Concrete colors and attributes, ready to be stamped into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleResolved {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attributes,
}

impl StyleResolved {
    pub const fn new(fg: Color, bg: Color, attrs: Attributes) -> Self {
        Self { fg, bg, attrs }
    }

    /// Copy with extra attributes or-ed in.
    pub fn with_attrs(self, attrs: Attributes) -> Self {
        Self { attrs: self.attrs | attrs, ..self }
    }

    /// Copy with a different background.
    pub fn with_bg(self, bg: Color) -> Self {
        Self { bg, ..self }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One terminal grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attributes,
}

impl Cell {
    /// A space in the terminal's default colors.
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attributes::empty(),
    };

    /// Placeholder for "unknown screen contents".
    ///
    /// Never produced by painting, so every real cell differs from it.
    pub const VOID: Cell = Cell {
        ch: '\0',
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attributes::empty(),
    };

    pub fn new(ch: char, style: &StyleResolved) -> Self {
        Self { ch, fg: style.fg, bg: style.bg, attrs: style.attrs }
    }

    /// The style this cell is drawn with.
    pub fn style(&self) -> StyleResolved {
        StyleResolved { fg: self.fg, bg: self.bg, attrs: self.attrs }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

// ===========================================================================
// Tests
// ===========================================================================
