//! Event system: input events, byte decoder, key bindings, focus, routing.

pub mod binding;
pub mod decoder;
pub mod focus;
pub mod input;
pub mod message;
pub mod router;
pub mod source;

pub use binding::{parse_key_combo, Binding, BindingAction, BindingError, KeyBindingRegistry};
pub use decoder::InputDecoder;
pub use focus::FocusChain;
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
pub use message::Command;
pub use router::{InteractionState, RouteOutcome, Router};
pub use source::{ByteSource, ChannelSource, CrosstermSource, InputSource};
