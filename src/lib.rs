//! # termui
//!
//! A terminal UI toolkit: a retained widget tree, an integer layout engine,
//! a diffing renderer and a cooperative app loop on tokio.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Offset, Size, Region, Spacing primitives
//! - **[`style`]**: colors, cell attributes, cells and resolved styles
//! - **[`theme`]**: variant tokens resolved against built-in themes
//! - **[`dom`]**: slotmap-backed widget tree with queued structural edits
//! - **[`layout`]**: vertical, horizontal and grid layout; hit-test map
//! - **[`widget`]**: the Widget trait and the event context
//! - **[`widgets`]**: built-in widgets: Container, Label, Button
//! - **[`event`]**: input events, byte decoder, key bindings, focus, routing
//! - **[`render`]**: frames, differ, output encoder, terminal guard
//! - **[`screen`]**: named screens and switching
//! - **[`app`]**: configuration, shared state and the input/update/render loops
//! - **[`testing`]**: headless Pilot and snapshot helpers

// Foundation
pub mod geometry;
pub mod style;
pub mod theme;

// Core systems
pub mod dom;
pub mod layout;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod screen;

// Headless testing
pub mod testing;

pub use app::{App, AppConfig, AppError, AppHandle, AppState};
pub use dom::{Dom, Node, NodeId};
pub use event::{Command, InputEvent, Key};
pub use screen::Screen;
pub use theme::Theme;
pub use widget::{EventCtx, Widget};
