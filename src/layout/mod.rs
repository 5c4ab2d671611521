//! Layout engine: constraints, linear and grid strategies, spatial map.

pub mod constraint;
pub mod engine;
pub mod grid;
pub mod linear;
pub mod spatial;

pub use constraint::{Arrangement, Direction, GridPlacement, GridSpec, LayoutSpec, SizeHint, Track};
pub use engine::{measure, resolve, LayoutError, LayoutResult};
pub use spatial::SpatialMap;
