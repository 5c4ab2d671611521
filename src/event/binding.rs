//! Global key binding registry.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to
//! [`BindingAction`]s. Bindings are consulted before the focused widget sees
//! a key. Combos can be written as strings like `"ctrl+c"`, `"shift+tab"` or
//! `"f5"`.
//!
//! Each binding also carries an optional description and a visibility flag,
//! so a help line or footer can list the keys worth advertising.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;

use super::input::{Key, KeyEvent, Modifiers};
use super::message::Command;

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingAction {
    Quit,
    FocusNext,
    FocusPrevious,
    /// Switch to a registered screen.
    ShowScreen(String),
    /// A named application action, delivered to the `on_command` hook.
    Custom(String),
}

impl BindingAction {
    /// The command the app loop should act on.
    pub fn to_command(&self) -> Command {
        match self {
            BindingAction::Quit => Command::Quit,
            BindingAction::FocusNext => Command::FocusNext,
            BindingAction::FocusPrevious => Command::FocusPrevious,
            BindingAction::ShowScreen(name) => Command::ShowScreen(name.clone()),
            BindingAction::Custom(name) => Command::Custom(name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("empty key combo")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

// ---------------------------------------------------------------------------
// Combo parsing
// ---------------------------------------------------------------------------

/// Parse a combo such as `"ctrl+shift+up"` into a normalized [`KeyEvent`].
///
/// Names are case-insensitive except single characters, which keep their
/// case (`"Q"` and `"q"` are different keys).
pub fn parse_key_combo(combo: &str) -> Result<KeyEvent, BindingError> {
    let combo = combo.trim();
    if combo.is_empty() {
        return Err(BindingError::Empty);
    }
    // "+" alone (or a trailing "++") binds the plus key itself.
    let (mods_part, key_part) = match combo.strip_suffix("++") {
        Some(prefix) => (prefix, "+"),
        None if combo == "+" => ("", "+"),
        None => match combo.rsplit_once('+') {
            Some((mods, key)) => (mods, key),
            None => ("", combo),
        },
    };

    let mut modifiers = Modifiers::NONE;
    for part in mods_part.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Modifiers::CTRL,
            "alt" | "meta" | "option" => Modifiers::ALT,
            "shift" => Modifiers::SHIFT,
            _ => return Err(BindingError::UnknownModifier(part.to_owned())),
        };
    }

    let code = parse_key_name(key_part)?;
    Ok(KeyEvent::new(code, modifiers).normalized())
}

fn parse_key_name(name: &str) -> Result<Key, BindingError> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(ch));
    }
    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        "tab" => Key::Tab,
        "backtab" => Key::BackTab,
        "backspace" => Key::Backspace,
        "insert" => Key::Insert,
        "delete" | "del" => Key::Delete,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "space" => Key::Char(' '),
        "plus" => Key::Char('+'),
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=24).contains(&n) => Key::F(n),
            _ => return Err(BindingError::UnknownKey(name.to_owned())),
        },
    };
    Ok(key)
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// One registered binding: the action plus how it should be advertised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub action: BindingAction,
    /// Short human label, e.g. "Quit".
    pub description: Option<String>,
    /// Whether help listings should show this binding.
    pub visible: bool,
    order: u64,
}

impl Binding {
    /// Set the description (builder).
    pub fn describe(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Keep the binding out of help listings (builder).
    pub fn hidden(&mut self) -> &mut Self {
        self.visible = false;
        self
    }
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> [`Binding`].
#[derive(Debug, Default)]
pub struct KeyBindingRegistry {
    bindings: HashMap<KeyEvent, Binding>,
    next_order: u64,
}

impl KeyBindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard bindings:
    ///
    /// - `q` -> Quit ("Quit"), `Ctrl+C` -> Quit (hidden)
    /// - `Tab` -> FocusNext (hidden)
    /// - `Shift+Tab` -> FocusPrevious (hidden)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('q'), Modifiers::NONE, BindingAction::Quit).describe("Quit");
        registry.bind(Key::Char('c'), Modifiers::CTRL, BindingAction::Quit).hidden();
        registry.bind(Key::Tab, Modifiers::NONE, BindingAction::FocusNext).hidden();
        registry.bind(Key::BackTab, Modifiers::SHIFT, BindingAction::FocusPrevious).hidden();
        registry
    }

    /// Register a binding, replacing any existing one for the same combo.
    ///
    /// The returned [`Binding`] is visible with no description until the
    /// caller says otherwise.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) -> &mut Binding {
        self.insert(KeyEvent::new(key, modifiers).normalized(), action)
    }

    /// Register a binding from a combo string.
    pub fn bind_str(&mut self, combo: &str, action: BindingAction) -> Result<&mut Binding, BindingError> {
        let event = parse_key_combo(combo)?;
        Ok(self.insert(event, action))
    }

    fn insert(&mut self, event: KeyEvent, action: BindingAction) -> &mut Binding {
        let order = self.next_order;
        self.next_order += 1;
        let binding = Binding { action, description: None, visible: true, order };
        match self.bindings.entry(event) {
            Entry::Occupied(mut slot) => {
                slot.insert(binding);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(binding),
        }
    }

    /// Remove a binding, returning its action.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings
            .remove(&KeyEvent::new(key, modifiers).normalized())
            .map(|binding| binding.action)
    }

    /// Look up the action bound to a key press.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.get(event).map(|binding| &binding.action)
    }

    /// The full binding for a key press.
    pub fn get(&self, event: &KeyEvent) -> Option<&Binding> {
        self.bindings.get(&event.normalized())
    }

    /// Visible bindings in registration order.
    pub fn visible(&self) -> impl Iterator<Item = (&KeyEvent, &Binding)> {
        let mut shown: Vec<_> = self.bindings.iter().filter(|(_, b)| b.visible).collect();
        shown.sort_by_key(|(_, b)| b.order);
        shown.into_iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
