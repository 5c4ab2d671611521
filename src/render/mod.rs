//! Rendering pipeline: frames, canvas, differ, output encoder, terminal.

pub mod canvas;
pub mod diff;
pub mod frame;
pub mod output;
pub mod renderer;
pub mod terminal;

pub use canvas::Canvas;
pub use diff::{diff, CellChange};
pub use frame::Frame;
pub use output::encode;
pub use renderer::{RenderError, Rendered, Renderer};
pub use terminal::{CrosstermTerminal, TerminalGuard, TerminalMode};
