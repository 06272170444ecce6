//! Domain layer: node hierarchy and operation dispatch
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod node;
pub mod operations;
pub mod tree_display;
pub mod walk;

pub use builder::{FnOperation, OperationBuilder};
pub use dispatch::{apply, apply_forest, apply_recursive, Operation};
pub use error::{DomainError, DomainResult};
pub use node::{Aggregate, Leaf, Node, NodeKind, Payload};
pub use operations::{Area, Describe, LeafCount, Perimeter, TotalSize};
pub use tree_display::TreeNodeConvert;
pub use walk::{Render, RenderLine, Walk};
