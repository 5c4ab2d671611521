//! Pilot: drive an [`AppState`] without a terminal or the app loops.
//!
//! Every simulated input is followed by what the loops would do next:
//! commands are processed, queued edits settle, and a render pass runs, so
//! the frame and focus/hover state can be inspected right away.

use crate::app::{AppConfig, AppError, AppState};
use crate::dom::node::Node;
use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
use crate::event::message::Command;
use crate::render::frame::Frame;
use crate::screen::{ScreenEntry, ScreenError};
use crate::widget::Widget;

use super::snapshot::frame_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for tests.
///
/// ```ignore
/// use termui::testing::Pilot;
/// use termui::event::Key;
///
/// let mut pilot = Pilot::mount(40, 10, root_node);
/// pilot.press_key(Key::Tab);
/// assert_eq!(pilot.focused_id().as_deref(), Some("ok"));
/// ```
pub struct Pilot {
    state: AppState,
    errors: Vec<AppError>,
}

impl Pilot {
    /// An empty app of the given size with the default config.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(AppConfig::default(), width, height)
    }

    pub fn with_config(config: AppConfig, width: u16, height: u16) -> Self {
        let mut state = AppState::new(&config);
        state.resize(width, height);
        Self { state, errors: Vec::new() }
    }

    /// Register `root` as the single screen "main" and start.
    pub fn mount(width: u16, height: u16, root: impl Fn() -> Node + Send + 'static) -> Self {
        let mut pilot = Self::new(width, height);
        pilot.screen("main", root);
        if let Err(err) = pilot.start() {
            pilot.errors.push(err.into());
        }
        pilot
    }

    pub fn screen<F>(&mut self, name: impl Into<String>, factory: F) -> &mut ScreenEntry
    where
        F: Fn() -> Node + Send + 'static,
    {
        self.state.screens.register(name, factory)
    }

    /// Show the first screen and run the first render pass.
    pub fn start(&mut self) -> Result<(), ScreenError> {
        self.state.start()?;
        self.step();
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Errors collected while settling or rendering, oldest first.
    pub fn take_errors(&mut self) -> Vec<AppError> {
        std::mem::take(&mut self.errors)
    }

    // -- Input ---------------------------------------------------------------

    pub fn input(&mut self, event: InputEvent) {
        self.state.handle_input(event);
        self.step();
    }

    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// One key press per character.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    /// Left button press at (x, y).
    pub fn click(&mut self, x: u16, y: u16) {
        self.input(InputEvent::Mouse(MouseEvent::new(MouseAction::Down(MouseBtn::Left), x, y)));
        self.input(InputEvent::Mouse(MouseEvent::new(MouseAction::Up(MouseBtn::Left), x, y)));
    }

    /// Pointer move to (x, y).
    pub fn hover(&mut self, x: u16, y: u16) {
        self.input(InputEvent::mouse(MouseAction::Moved, x, y));
    }

    pub fn paste(&mut self, text: &str) {
        self.input(InputEvent::Paste(text.to_owned()));
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.input(InputEvent::Resize { width, height });
    }

    pub fn post(&mut self, command: Command) {
        self.state.post(command);
        self.step();
    }

    /// One update tick.
    pub fn tick(&mut self) {
        self.state.tick();
        self.step();
    }

    /// Process commands, settle, render.
    fn step(&mut self) {
        self.state.process_commands();
        if !self.state.is_running() {
            return;
        }
        let result = self.state.settle().and_then(|()| self.state.render().map(|_| ()));
        if let Err(err) = result {
            self.errors.push(err);
        }
    }

    // -- Inspection ----------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn frame(&self) -> &Frame {
        self.state.frame()
    }

    /// The current frame as text (see [`frame_to_string`]).
    pub fn frame_text(&self) -> String {
        frame_to_string(self.state.frame())
    }

    pub fn row_text(&self, row: u16) -> String {
        self.state.frame().row_text(row)
    }

    pub fn active_screen(&self) -> Option<&str> {
        self.state.screens.active_name()
    }

    /// The string id of the focused node.
    pub fn focused_id(&self) -> Option<String> {
        let id = self.state.interaction.focused()?;
        self.id_of(id)
    }

    /// The string id of the hovered node.
    pub fn hovered_id(&self) -> Option<String> {
        let id = self.state.interaction.hovered()?;
        self.id_of(id)
    }

    fn id_of(&self, id: crate::dom::node::NodeId) -> Option<String> {
        self.state.screens.active()?.dom.get(id)?.id.clone()
    }

    /// A widget on the active screen by string id and concrete type.
    pub fn widget<W: Widget + 'static>(&self, id: &str) -> Option<&W> {
        self.state.screens.active()?.dom.widget::<W>(id)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
