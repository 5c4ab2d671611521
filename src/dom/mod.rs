//! Widget tree: slotmap-backed arena, declarative builder, queued edits.

pub mod node;
pub mod ops;
pub mod query;
pub mod tree;

pub use node::{EventHandler, Node, NodeData, NodeId};
pub use ops::{Target, TreeOp};
pub use tree::{Dom, TreeError};
