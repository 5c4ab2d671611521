//! Widget system: the capability trait and the event context.

pub mod context;
pub mod traits;

pub use context::EventCtx;
pub use traits::Widget;
