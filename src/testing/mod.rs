//! Headless testing: the [`Pilot`], a recording terminal and snapshot helpers.
//!
//! Use the [`Pilot`] to drive an app without a real terminal, and
//! [`frame_to_string`] / [`render_to_string`] to turn rendered frames into
//! plain text for assertions and `insta` snapshots.

pub mod pilot;
pub mod snapshot;
pub mod terminal;

pub use pilot::Pilot;
pub use snapshot::{frame_to_string, region_to_string, render_node, render_to_string};
pub use terminal::HeadlessTerminal;
