//! Built-in widgets: Container, Label, Button.

pub mod button;
pub mod container;
pub mod label;

pub use button::Button;
pub use container::Container;
pub use label::Label;
