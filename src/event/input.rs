//! Input event types, decoupled from crossterm.
//!
//! Both input sources (the raw byte decoder and the crossterm event stream)
//! produce [`InputEvent`]; the rest of the toolkit never sees crossterm types.

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Insert,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

bitflags! {
    /// Modifier key bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers::empty();

    /// Decode the xterm modifier parameter (`1 + bitmask`) used in CSI keys.
    pub fn from_xterm(param: u16) -> Self {
        let bits = param.saturating_sub(1);
        let mut out = Modifiers::NONE;
        if bits & 1 != 0 {
            out |= Modifiers::SHIFT;
        }
        if bits & 2 != 0 {
            out |= Modifiers::ALT;
        }
        if bits & 4 != 0 {
            out |= Modifiers::CTRL;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Normalize so equivalent presses compare equal.
    ///
    /// `BackTab` and `Shift+Tab` both become `BackTab` with `SHIFT`; for
    /// characters, `SHIFT` is dropped because the case is already in the char.
    pub fn normalized(self) -> Self {
        match self.code {
            Key::BackTab => Self::new(Key::BackTab, self.modifiers | Modifiers::SHIFT),
            Key::Tab if self.modifiers.contains(Modifiers::SHIFT) => {
                Self::new(Key::BackTab, self.modifiers)
            }
            Key::Char(_) => Self::new(self.code, self.modifiers - Modifiers::SHIFT),
            _ => self,
        }
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// A mouse event at a 0-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseAction, x: u16, y: u16) -> Self {
        Self { kind, x, y, modifiers: Modifiers::NONE }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
}

impl InputEvent {
    pub fn key(code: Key) -> Self {
        InputEvent::Key(KeyEvent::plain(code))
    }

    pub fn mouse(kind: MouseAction, x: u16, y: u16) -> Self {
        InputEvent::Mouse(MouseEvent::new(kind, x, y))
    }
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers;

    let mut out = Modifiers::NONE;
    if m.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if m.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if m.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyCode;

        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            // Media keys, lock keys and the like have no counterpart.
            _ => Key::Escape,
        };
        KeyEvent::new(code, convert_modifiers(ct.modifiers))
    }
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseBtn {
    match b {
        crossterm::event::MouseButton::Left => MouseBtn::Left,
        crossterm::event::MouseButton::Right => MouseBtn::Right,
        crossterm::event::MouseButton::Middle => MouseBtn::Middle,
    }
}

/// Convert a crossterm event.
///
/// Returns `None` for key releases/repeats (only presses are routed) and for
/// horizontal scrolling.
pub fn from_crossterm(event: crossterm::event::Event) -> Option<InputEvent> {
    use crossterm::event::{Event, KeyEventKind, MouseEventKind};

    let converted = match event {
        Event::Key(ke) => {
            if ke.kind != KeyEventKind::Press {
                return None;
            }
            InputEvent::Key(KeyEvent::from(ke))
        }
        Event::Mouse(me) => {
            let kind = match me.kind {
                MouseEventKind::Down(b) => MouseAction::Down(convert_mouse_button(b)),
                MouseEventKind::Up(b) => MouseAction::Up(convert_mouse_button(b)),
                MouseEventKind::Drag(b) => MouseAction::Drag(convert_mouse_button(b)),
                MouseEventKind::Moved => MouseAction::Moved,
                MouseEventKind::ScrollUp => MouseAction::ScrollUp,
                MouseEventKind::ScrollDown => MouseAction::ScrollDown,
                MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
            };
            InputEvent::Mouse(MouseEvent {
                kind,
                x: me.column,
                y: me.row,
                modifiers: convert_modifiers(me.modifiers),
            })
        }
        Event::Resize(width, height) => InputEvent::Resize { width, height },
        Event::FocusGained => InputEvent::FocusGained,
        Event::FocusLost => InputEvent::FocusLost,
        Event::Paste(s) => InputEvent::Paste(s),
    };
    Some(converted)
}

// ===========================================================================
// Tests
// ===========================================================================
