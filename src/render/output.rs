//! Output encoder: turns a diff into terminal bytes.
//!
//! Only three kinds of output are produced: cursor moves, color/attribute
//! changes and literal character runs. A cursor move is emitted only when the
//! next change is not directly after the previous one, and style sequences
//! only when the style actually changes.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self as cs, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::style::{Attributes, Color, StyleResolved};

use super::diff::CellChange;

/// Map a cell color to crossterm. `Default` restores the terminal default.
pub fn to_crossterm(color: Color) -> cs::Color {
    match color {
        Color::Default => cs::Color::Reset,
        Color::Ansi(n) => cs::Color::AnsiValue(n),
        Color::Rgb(r, g, b) => cs::Color::Rgb { r, g, b },
    }
}

const ATTRIBUTE_MAP: [(Attributes, Attribute); 6] = [
    (Attributes::BOLD, Attribute::Bold),
    (Attributes::DIM, Attribute::Dim),
    (Attributes::ITALIC, Attribute::Italic),
    (Attributes::UNDERLINE, Attribute::Underlined),
    (Attributes::REVERSE, Attribute::Reverse),
    (Attributes::STRIKETHROUGH, Attribute::CrossedOut),
];

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

struct Encoder<'w, W: Write> {
    out: &'w mut W,
    /// Where the terminal cursor sits after the last printed cell.
    cursor: Option<(u16, u16)>,
    style: Option<StyleResolved>,
    run: String,
}

impl<W: Write> Encoder<'_, W> {
    fn flush_run(&mut self) -> io::Result<()> {
        if !self.run.is_empty() {
            queue!(self.out, Print(&self.run))?;
            self.run.clear();
        }
        Ok(())
    }

    fn set_style(&mut self, next: StyleResolved) -> io::Result<()> {
        let current = self.style;
        if current == Some(next) {
            return Ok(());
        }
        self.flush_run()?;
        match current {
            // Attributes cannot be switched off individually in a portable
            // way, so any attribute change starts from a reset.
            Some(cur) if cur.attrs == next.attrs => {
                if cur.fg != next.fg {
                    queue!(self.out, SetForegroundColor(to_crossterm(next.fg)))?;
                }
                if cur.bg != next.bg {
                    queue!(self.out, SetBackgroundColor(to_crossterm(next.bg)))?;
                }
            }
            _ => {
                queue!(self.out, SetAttribute(Attribute::Reset))?;
                for (flag, attribute) in ATTRIBUTE_MAP {
                    if next.attrs.contains(flag) {
                        queue!(self.out, SetAttribute(attribute))?;
                    }
                }
                queue!(
                    self.out,
                    SetForegroundColor(to_crossterm(next.fg)),
                    SetBackgroundColor(to_crossterm(next.bg))
                )?;
            }
        }
        self.style = Some(next);
        Ok(())
    }

    fn push(&mut self, change: &CellChange) -> io::Result<()> {
        if self.cursor != Some((change.col, change.row)) {
            self.flush_run()?;
            queue!(self.out, MoveTo(change.col, change.row))?;
        }
        self.set_style(change.cell.style())?;
        // The unknown-contents sentinel never reaches the terminal.
        let ch = if change.cell.ch == '\0' { ' ' } else { change.cell.ch };
        self.run.push(ch);
        self.cursor = Some((change.col.saturating_add(1), change.row));
        Ok(())
    }
}

/// Encode `changes` (row-major, as produced by [`diff`](super::diff::diff)).
///
/// Nothing is written for an empty change list; otherwise the output ends
/// with an attribute reset so the terminal is left in its default style.
pub fn encode<W: Write>(changes: &[CellChange], out: &mut W) -> io::Result<()> {
    if changes.is_empty() {
        return Ok(());
    }
    let mut encoder = Encoder { out, cursor: None, style: None, run: String::new() };
    for change in changes {
        encoder.push(change)?;
    }
    encoder.flush_run()?;
    queue!(encoder.out, SetAttribute(Attribute::Reset))?;
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
