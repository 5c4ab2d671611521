//! Screens and the screen registry.
//!
//! A [`Screen`] is a named widget tree plus its metadata (title, background
//! variant) and the spatial map from its last layout. The
//! [`ScreenRegistry`] owns every registered screen, builds each one lazily
//! from its factory the first time it is shown, and keeps exactly one active.
//!
//! Switching is two-phase: [`ScreenRegistry::request`] records a pending
//! switch and [`ScreenRegistry::apply_pending`] performs it. The app calls the
//! latter only at the safe point between update and render, so a render pass
//! never sees a half-switched screen.

use thiserror::Error;
use tracing::info;

use crate::dom::node::{Node, NodeId};
use crate::dom::tree::Dom;
use crate::layout::spatial::SpatialMap;

/// Background variant used when a screen does not set one.
pub const DEFAULT_BACKGROUND: &str = "base_100";

/// Builds a screen's root node.
pub type ScreenFactory = Box<dyn Fn() -> Node + Send>;

// ---------------------------------------------------------------------------
// ScreenError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("unknown screen `{name}` (registered: {})", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },
    #[error("no screens registered")]
    NoScreens,
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// One screen: a widget tree and its metadata.
#[derive(Debug)]
pub struct Screen {
    name: String,
    pub title: Option<String>,
    /// Theme variant painted behind the whole tree.
    pub background: String,
    pub dom: Dom,
    /// Hit-test map from the most recent successful layout.
    pub spatial: SpatialMap,
}

impl Screen {
    /// Mount `root` into a fresh tree.
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        let mut dom = Dom::new();
        dom.mount(root);
        Self {
            name: name.into(),
            title: None,
            background: DEFAULT_BACKGROUND.to_owned(),
            dom,
            spatial: SpatialMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_background(mut self, variant: impl Into<String>) -> Self {
        self.background = variant.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> Option<NodeId> {
        self.dom.root()
    }
}

// ---------------------------------------------------------------------------
// ScreenRegistry
// ---------------------------------------------------------------------------

/// Registration record for one screen.
pub struct ScreenEntry {
    name: String,
    title: Option<String>,
    background: String,
    factory: ScreenFactory,
    built: Option<Screen>,
}

impl ScreenEntry {
    /// Set the title the screen is built with.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Set the background variant the screen is built with.
    pub fn background(&mut self, variant: impl Into<String>) -> &mut Self {
        self.background = variant.into();
        self
    }

    fn build(&self) -> Screen {
        let mut screen = Screen::new(self.name.clone(), (self.factory)()).with_background(self.background.clone());
        screen.title = self.title.clone();
        screen
    }
}

impl std::fmt::Debug for ScreenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenEntry")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("background", &self.background)
            .field("built", &self.built.is_some())
            .finish_non_exhaustive()
    }
}

/// Every registered screen, in registration order, and which one is active.
#[derive(Debug, Default)]
pub struct ScreenRegistry {
    entries: Vec<ScreenEntry>,
    active: Option<usize>,
    pending: Option<String>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen under `name`.
    ///
    /// Registering an existing name replaces its factory and drops the
    /// previously built tree; if it was active it is rebuilt on the next
    /// [`show`](Self::show).
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut ScreenEntry
    where
        F: Fn() -> Node + Send + 'static,
    {
        let name = name.into();
        let entry = ScreenEntry {
            name: name.clone(),
            title: None,
            background: DEFAULT_BACKGROUND.to_owned(),
            factory: Box::new(factory),
            built: None,
        };
        let index = match self.position(&name) {
            Some(index) => {
                if self.active == Some(index) {
                    self.active = None;
                }
                self.entries[index] = entry;
                index
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    fn not_found(&self, name: &str) -> ScreenError {
        ScreenError::NotFound {
            name: name.to_owned(),
            available: self.names().into_iter().map(str::to_owned).collect(),
        }
    }

    /// Make `name` active immediately, building it on first use.
    ///
    /// Returns whether the active screen changed. Outside of startup, prefer
    /// [`request`](Self::request) so the switch lands on a safe point.
    pub fn show(&mut self, name: &str) -> Result<bool, ScreenError> {
        let index = self.position(name).ok_or_else(|| self.not_found(name))?;
        let entry = &mut self.entries[index];
        if entry.built.is_none() {
            entry.built = Some(entry.build());
        }
        if self.active == Some(index) {
            return Ok(false);
        }
        self.active = Some(index);
        info!(screen = name, "screen shown");
        Ok(true)
    }

    /// Activate the first registered screen if none is active yet.
    pub fn ensure_active(&mut self) -> Result<(), ScreenError> {
        if self.active.is_some() {
            return Ok(());
        }
        let first = self.entries.first().map(|e| e.name.clone()).ok_or(ScreenError::NoScreens)?;
        self.show(&first).map(|_| ())
    }

    /// Record a switch to `name`, applied by [`apply_pending`](Self::apply_pending).
    ///
    /// Unknown names are rejected here so the error reaches the caller
    /// instead of surfacing later at the safe point.
    pub fn request(&mut self, name: &str) -> Result<(), ScreenError> {
        if !self.contains(name) {
            return Err(self.not_found(name));
        }
        self.pending = Some(name.to_owned());
        Ok(())
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Perform a pending switch. Returns whether the active screen changed.
    pub fn apply_pending(&mut self) -> Result<bool, ScreenError> {
        match self.pending.take() {
            Some(name) => self.show(&name),
            None => Ok(false),
        }
    }

    pub fn active(&self) -> Option<&Screen> {
        self.active.and_then(|i| self.entries[i].built.as_ref())
    }

    pub fn active_mut(&mut self) -> Option<&mut Screen> {
        self.active.and_then(|i| self.entries[i].built.as_mut())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].name.as_str())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Container, Label};

    fn labelled(text: &'static str) -> impl Fn() -> Node + Send + 'static {
        move || Node::new(Container::new()).child(Node::new(Label::new(text)).id("label"))
    }

    fn registry() -> ScreenRegistry {
        let mut screens = ScreenRegistry::new();
        screens.register("main", labelled("main"));
        screens.register("help", labelled("help")).title("Help").background("base_200");
        screens
    }

    #[test]
    fn nothing_active_until_shown() {
        let screens = registry();
        assert!(screens.active().is_none());
        assert_eq!(screens.names(), vec!["main", "help"]);
        assert_eq!(screens.len(), 2);
    }

    #[test]
    fn ensure_active_picks_first() {
        let mut screens = registry();
        screens.ensure_active().unwrap();
        assert_eq!(screens.active_name(), Some("main"));
        assert_eq!(screens.active().unwrap().background, DEFAULT_BACKGROUND);
    }

    #[test]
    fn ensure_active_without_screens() {
        assert_eq!(ScreenRegistry::new().ensure_active(), Err(ScreenError::NoScreens));
    }

    #[test]
    fn show_builds_with_metadata() {
        let mut screens = registry();
        assert!(screens.show("help").unwrap());
        let screen = screens.active().unwrap();
        assert_eq!(screen.name(), "help");
        assert_eq!(screen.title.as_deref(), Some("Help"));
        assert_eq!(screen.background, "base_200");
        assert_eq!(screen.dom.widget::<Label>("label").unwrap().text(), "help");
        // Showing the active screen again is a no-op.
        assert!(!screens.show("help").unwrap());
    }

    #[test]
    fn unknown_screen_lists_available() {
        let mut screens = registry();
        let err = screens.show("nope").unwrap_err();
        assert_eq!(
            err,
            ScreenError::NotFound { name: "nope".into(), available: vec!["main".into(), "help".into()] }
        );
        assert_eq!(err.to_string(), "unknown screen `nope` (registered: main, help)");
        assert!(screens.request("nope").is_err());
        assert!(!screens.has_pending());
    }

    #[test]
    fn built_screens_keep_their_state() {
        let mut screens = registry();
        screens.show("main").unwrap();
        screens.active_mut().unwrap().dom.widget_mut::<Label>("label").unwrap().set_text("edited");
        screens.show("help").unwrap();
        screens.show("main").unwrap();
        assert_eq!(screens.active().unwrap().dom.widget::<Label>("label").unwrap().text(), "edited");
    }

    #[test]
    fn request_is_deferred() {
        let mut screens = registry();
        screens.ensure_active().unwrap();
        screens.request("help").unwrap();
        assert!(screens.has_pending());
        assert_eq!(screens.active_name(), Some("main"));
        assert!(screens.apply_pending().unwrap());
        assert_eq!(screens.active_name(), Some("help"));
        assert!(!screens.apply_pending().unwrap());
    }

    #[test]
    fn re_register_replaces_factory() {
        let mut screens = registry();
        screens.show("main").unwrap();
        screens.register("main", labelled("v2"));
        assert!(screens.active().is_none());
        screens.show("main").unwrap();
        assert_eq!(screens.active().unwrap().dom.widget::<Label>("label").unwrap().text(), "v2");
        assert_eq!(screens.len(), 2);
    }
}
