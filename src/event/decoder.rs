//! Raw terminal byte decoder.
//!
//! Turns the byte stream of a terminal in raw mode into [`InputEvent`]s:
//!
//! - printable ASCII and UTF-8 characters
//! - control keys (Ctrl+letter, Tab, Enter, Backspace)
//! - CSI cursor/navigation keys, with xterm modifier parameters
//! - SS3 F1-F4 and cursor keys
//! - `CSI n ~` keys (Home, Insert, Delete, End, PageUp, PageDown, F5-F12)
//! - Shift+Tab (`CSI Z`) and Alt+key (ESC prefix)
//! - SGR mouse reports and legacy X10 mouse reports
//! - focus in/out and bracketed paste
//!
//! A lone ESC is ambiguous until more bytes arrive, so the decoder keeps it
//! pending; the caller calls [`InputDecoder::flush`] once its input timeout
//! elapses with nothing new.

use super::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};

const ESC: u8 = 0x1b;
const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

// ---------------------------------------------------------------------------
// Parse step
// ---------------------------------------------------------------------------

enum Step {
    /// `n` bytes consumed, producing an event or nothing.
    Done(usize, Option<InputEvent>),
    /// More bytes are needed to decide.
    Incomplete,
}

fn key(code: Key, modifiers: Modifiers) -> Option<InputEvent> {
    Some(InputEvent::Key(KeyEvent::new(code, modifiers)))
}

// ---------------------------------------------------------------------------
// InputDecoder
// ---------------------------------------------------------------------------

/// Incremental decoder; bytes may arrive split at any boundary.
#[derive(Debug, Default)]
pub struct InputDecoder {
    buf: Vec<u8>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self { buf: Vec::with_capacity(64) }
    }

    /// Feed raw bytes and return every event that is now complete.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<InputEvent> {
        self.buf.extend_from_slice(bytes);
        let mut events = Vec::new();
        while !self.buf.is_empty() {
            match self.step() {
                Step::Done(n, event) => {
                    self.buf.drain(..n);
                    events.extend(event);
                }
                Step::Incomplete => break,
            }
        }
        events
    }

    /// Whether bytes are held back waiting for a continuation.
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Resolve pending bytes after the input timeout.
    ///
    /// A pending ESC becomes the Escape key, an unterminated paste is
    /// delivered as-is, and truncated UTF-8 is discarded.
    pub fn flush(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while !self.buf.is_empty() {
            if self.buf.starts_with(PASTE_START) {
                let text = String::from_utf8_lossy(&self.buf[PASTE_START.len()..]).into_owned();
                events.push(InputEvent::Paste(text));
                self.buf.clear();
                break;
            }
            match self.step() {
                Step::Done(n, event) => {
                    self.buf.drain(..n);
                    events.extend(event);
                }
                Step::Incomplete => {
                    if self.buf[0] == ESC {
                        events.extend(key(Key::Escape, Modifiers::NONE));
                    }
                    self.buf.drain(..1);
                }
            }
        }
        events
    }

    fn step(&self) -> Step {
        decode_one(&self.buf)
    }
}

fn decode_one(buf: &[u8]) -> Step {
    let Some(&first) = buf.first() else {
        return Step::Incomplete;
    };
    match first {
        ESC => decode_escape(buf),
        0x00 => Step::Done(1, key(Key::Char(' '), Modifiers::CTRL)),
        0x08 | 0x7f => Step::Done(1, key(Key::Backspace, Modifiers::NONE)),
        0x09 => Step::Done(1, key(Key::Tab, Modifiers::NONE)),
        0x0a | 0x0d => Step::Done(1, key(Key::Enter, Modifiers::NONE)),
        0x01..=0x1a => {
            let ch = (first - 1 + b'a') as char;
            Step::Done(1, key(Key::Char(ch), Modifiers::CTRL))
        }
        0x1c..=0x1f => Step::Done(1, key(Key::Char((first + 0x40) as char), Modifiers::CTRL)),
        0x20..=0x7e => Step::Done(1, key(Key::Char(first as char), Modifiers::NONE)),
        _ => decode_utf8(buf),
    }
}

fn decode_utf8(buf: &[u8]) -> Step {
    let len = match buf[0] {
        b if b & 0xe0 == 0xc0 => 2,
        b if b & 0xf0 == 0xe0 => 3,
        b if b & 0xf8 == 0xf0 => 4,
        // Stray continuation byte.
        _ => return Step::Done(1, None),
    };
    if buf.len() < len {
        return Step::Incomplete;
    }
    match std::str::from_utf8(&buf[..len]).ok().and_then(|s| s.chars().next()) {
        Some(ch) => Step::Done(len, key(Key::Char(ch), Modifiers::NONE)),
        None => Step::Done(1, None),
    }
}

fn decode_escape(buf: &[u8]) -> Step {
    let Some(&second) = buf.get(1) else {
        return Step::Incomplete;
    };
    match second {
        b'[' => decode_csi(buf),
        b'O' => decode_ss3(buf),
        // A second ESC starts its own sequence; the first is a plain Escape.
        ESC => Step::Done(1, key(Key::Escape, Modifiers::NONE)),
        _ => match decode_one(&buf[1..]) {
            Step::Done(n, Some(InputEvent::Key(k))) => Step::Done(
                n + 1,
                key(k.code, k.modifiers | Modifiers::ALT),
            ),
            Step::Done(n, other) => Step::Done(n + 1, other),
            Step::Incomplete => Step::Incomplete,
        },
    }
}

fn decode_ss3(buf: &[u8]) -> Step {
    let Some(&code) = buf.get(2) else {
        return Step::Incomplete;
    };
    let event = match code {
        b'A' => key(Key::Up, Modifiers::NONE),
        b'B' => key(Key::Down, Modifiers::NONE),
        b'C' => key(Key::Right, Modifiers::NONE),
        b'D' => key(Key::Left, Modifiers::NONE),
        b'H' => key(Key::Home, Modifiers::NONE),
        b'F' => key(Key::End, Modifiers::NONE),
        b'P'..=b'S' => key(Key::F(code - b'P' + 1), Modifiers::NONE),
        _ => None,
    };
    Step::Done(3, event)
}

fn parse_params(raw: &[u8]) -> Vec<u16> {
    raw.split(|&b| b == b';')
        .map(|part| {
            std::str::from_utf8(part)
                .ok()
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(0)
        })
        .collect()
}

fn decode_csi(buf: &[u8]) -> Step {
    // Legacy X10 mouse: ESC [ M Cb Cx Cy
    if buf.get(2) == Some(&b'M') {
        return decode_x10_mouse(buf);
    }

    // Parameter and intermediate bytes run until a final byte in 0x40..=0x7e.
    let Some(offset) = buf[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Step::Incomplete;
    };
    let end = 2 + offset;
    let final_byte = buf[end];
    let consumed = end + 1;

    if buf.get(2) == Some(&b'<') {
        return Step::Done(consumed, decode_sgr_mouse(&buf[3..end], final_byte));
    }

    let params = parse_params(&buf[2..end]);
    let modifiers = params
        .get(1)
        .map_or(Modifiers::NONE, |&m| Modifiers::from_xterm(m));

    let event = match final_byte {
        b'A' => key(Key::Up, modifiers),
        b'B' => key(Key::Down, modifiers),
        b'C' => key(Key::Right, modifiers),
        b'D' => key(Key::Left, modifiers),
        b'H' => key(Key::Home, modifiers),
        b'F' => key(Key::End, modifiers),
        b'P'..=b'S' => key(Key::F(final_byte - b'P' + 1), modifiers),
        b'Z' => key(Key::BackTab, Modifiers::SHIFT),
        b'I' => Some(InputEvent::FocusGained),
        b'O' => Some(InputEvent::FocusLost),
        b'~' => match params.first().copied().unwrap_or(0) {
            200 => return decode_paste(buf),
            1 | 7 => key(Key::Home, modifiers),
            2 => key(Key::Insert, modifiers),
            3 => key(Key::Delete, modifiers),
            4 | 8 => key(Key::End, modifiers),
            5 => key(Key::PageUp, modifiers),
            6 => key(Key::PageDown, modifiers),
            n @ 11..=15 => key(Key::F((n - 10) as u8), modifiers),
            n @ 17..=21 => key(Key::F((n - 11) as u8), modifiers),
            n @ 23..=24 => key(Key::F((n - 12) as u8), modifiers),
            _ => None,
        },
        _ => None,
    };
    Step::Done(consumed, event)
}

fn decode_paste(buf: &[u8]) -> Step {
    let body = &buf[PASTE_START.len()..];
    match body.windows(PASTE_END.len()).position(|w| w == PASTE_END) {
        Some(at) => {
            let text = String::from_utf8_lossy(&body[..at]).into_owned();
            Step::Done(PASTE_START.len() + at + PASTE_END.len(), Some(InputEvent::Paste(text)))
        }
        None => Step::Incomplete,
    }
}

fn mouse_modifiers(cb: u16) -> Modifiers {
    let mut modifiers = Modifiers::NONE;
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }
    modifiers
}

fn mouse_button(base: u16) -> MouseBtn {
    match base {
        0 => MouseBtn::Left,
        1 => MouseBtn::Middle,
        _ => MouseBtn::Right,
    }
}

/// `ESC [ < b ; x ; y (M|m)`, coordinates 1-based.
fn decode_sgr_mouse(raw: &[u8], final_byte: u8) -> Option<InputEvent> {
    if final_byte != b'M' && final_byte != b'm' {
        return None;
    }
    let params = parse_params(raw);
    let [cb, x, y] = params[..] else {
        return None;
    };
    let base = cb & 3;
    let kind = if cb & 64 != 0 {
        match base {
            0 => MouseAction::ScrollUp,
            1 => MouseAction::ScrollDown,
            // Horizontal wheel.
            _ => return None,
        }
    } else if cb & 32 != 0 {
        if base == 3 {
            MouseAction::Moved
        } else {
            MouseAction::Drag(mouse_button(base))
        }
    } else if final_byte == b'm' {
        MouseAction::Up(mouse_button(base))
    } else {
        MouseAction::Down(mouse_button(base))
    };
    Some(InputEvent::Mouse(MouseEvent {
        kind,
        x: x.saturating_sub(1),
        y: y.saturating_sub(1),
        modifiers: mouse_modifiers(cb),
    }))
}

/// `ESC [ M Cb Cx Cy`, each value offset by 32 and coordinates 1-based.
fn decode_x10_mouse(buf: &[u8]) -> Step {
    if buf.len() < 6 {
        return Step::Incomplete;
    }
    let cb = u16::from(buf[3].wrapping_sub(32));
    let x = u16::from(buf[4].wrapping_sub(33));
    let y = u16::from(buf[5].wrapping_sub(33));
    let base = cb & 3;
    let kind = if cb & 64 != 0 {
        if base == 0 {
            MouseAction::ScrollUp
        } else {
            MouseAction::ScrollDown
        }
    } else if cb & 32 != 0 {
        if base == 3 {
            MouseAction::Moved
        } else {
            MouseAction::Drag(mouse_button(base))
        }
    } else if base == 3 {
        // X10 does not say which button was released.
        MouseAction::Up(MouseBtn::Left)
    } else {
        MouseAction::Down(mouse_button(base))
    };
    Step::Done(
        6,
        Some(InputEvent::Mouse(MouseEvent { kind, x, y, modifiers: mouse_modifiers(cb) })),
    )
}

// ===========================================================================
// Tests
// ===========================================================================
