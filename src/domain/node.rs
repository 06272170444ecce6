//! Node hierarchy: a closed set of leaf payloads plus one aggregate kind.
//!
//! A [`Node`] owns its children outright. There is no parent pointer, no
//! sharing and no removal, so a hierarchy is always a finite strict tree.
//! Derived values are recomputed on every call.
//!
//! Traversal, aggregation and drop use explicit stacks. The derived `Clone`,
//! `PartialEq` and `Debug` impls recurse, as do
//! [`apply`](crate::domain::apply) and tree display, so their depth is
//! limited by the call stack.

use std::f64::consts::PI;
use std::fmt;

use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::walk::{Render, Walk};

/// Dispatchable node kinds.
///
/// Every [`Operation`](crate::domain::Operation) provides exactly one handler
/// per entry of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Size,
    Circle,
    Rectangle,
    Aggregate,
}

impl NodeKind {
    /// All kinds, in handler declaration order.
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Size,
        NodeKind::Circle,
        NodeKind::Rectangle,
        NodeKind::Aggregate,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Size => "size",
            NodeKind::Circle => "circle",
            NodeKind::Rectangle => "rectangle",
            NodeKind::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// Scalar payload carried by a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    /// File-like leaf; the unit is left to the formatter.
    Size { size: u64 },
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Payload {
    pub fn kind(&self) -> NodeKind {
        match self {
            Payload::Size { .. } => NodeKind::Size,
            Payload::Circle { .. } => NodeKind::Circle,
            Payload::Rectangle { .. } => NodeKind::Rectangle,
        }
    }

    /// Kind-specific scalar: the size itself, or the enclosed area of a shape.
    pub fn value(&self) -> f64 {
        match *self {
            Payload::Size { size } => size as f64,
            Payload::Circle { radius } => PI * radius * radius,
            Payload::Rectangle { width, height } => width * height,
        }
    }

    fn validate(&self, label: &str) -> DomainResult<()> {
        let dimensions = match *self {
            Payload::Size { .. } => vec![],
            Payload::Circle { radius } => vec![("radius", radius)],
            Payload::Rectangle { width, height } => vec![("width", width), ("height", height)],
        };
        for (name, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidPayload {
                    label: label.to_string(),
                    reason: format!("{} must be finite and non-negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Size { size } => write!(f, "size {}", size),
            Payload::Circle { radius } => write!(f, "radius {}", radius),
            Payload::Rectangle { width, height } => write!(f, "{} x {}", width, height),
        }
    }
}

/// Childless node. Label and payload are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    label: String,
    payload: Payload,
}

impl Leaf {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn payload(&self) -> Payload {
        self.payload
    }
}

/// Node owning an ordered sequence of children.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    label: String,
    children: Vec<Node>,
}

impl Aggregate {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

// Flattens descendants onto a heap stack so each node drops with no children left.
impl Drop for Aggregate {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let Node::Aggregate(aggregate) = &mut node {
                pending.append(&mut aggregate.children);
            }
        }
    }
}

/// Tree node in the part-whole hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Aggregate(Aggregate),
}

impl Node {
    /// File-like leaf. Sizes are non-negative by type, so this cannot fail.
    pub fn file(label: impl Into<String>, size: u64) -> Self {
        Node::Leaf(Leaf {
            label: label.into(),
            payload: Payload::Size { size },
        })
    }

    pub fn circle(label: impl Into<String>, radius: f64) -> DomainResult<Self> {
        Self::leaf(label, Payload::Circle { radius })
    }

    pub fn rectangle(label: impl Into<String>, width: f64, height: f64) -> DomainResult<Self> {
        Self::leaf(label, Payload::Rectangle { width, height })
    }

    /// Leaf with an arbitrary payload.
    ///
    /// Fails with [`DomainError::InvalidPayload`] if a dimension is negative,
    /// NaN or infinite.
    #[instrument(level = "trace", skip(label))]
    pub fn leaf(label: impl Into<String>, payload: Payload) -> DomainResult<Self> {
        let label = label.into();
        payload.validate(&label)?;
        Ok(Node::Leaf(Leaf { label, payload }))
    }

    /// Aggregate with no children yet.
    pub fn aggregate(label: impl Into<String>) -> Self {
        Node::Aggregate(Aggregate {
            label: label.into(),
            children: Vec::new(),
        })
    }

    /// Appends `child` as the last child of this aggregate.
    ///
    /// Leaves reject children with [`DomainError::InvalidOperation`] and are
    /// left untouched.
    #[instrument(level = "trace", skip(self, child), fields(parent = %self.label(), child = %child.label()))]
    pub fn append_child(&mut self, child: Node) -> DomainResult<()> {
        match self {
            Node::Aggregate(aggregate) => {
                debug!(position = aggregate.children.len(), "appending child");
                aggregate.children.push(child);
                Ok(())
            }
            Node::Leaf(leaf) => {
                warn!(kind = %leaf.payload.kind(), "rejected child for leaf");
                Err(DomainError::InvalidOperation {
                    label: leaf.label.clone(),
                    reason: format!("cannot append '{}' to a leaf", child.label()),
                })
            }
        }
    }

    /// Chaining form of [`Node::append_child`] for top-down construction.
    pub fn with_child(mut self, child: Node) -> DomainResult<Self> {
        self.append_child(child)?;
        Ok(self)
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Leaf(leaf) => &leaf.label,
            Node::Aggregate(aggregate) => &aggregate.label,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(leaf) => leaf.payload.kind(),
            Node::Aggregate(_) => NodeKind::Aggregate,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Leaf payload, `None` for aggregates.
    pub fn payload(&self) -> Option<Payload> {
        match self {
            Node::Leaf(leaf) => Some(leaf.payload),
            Node::Aggregate(_) => None,
        }
    }

    /// Direct children; always empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Aggregate(aggregate) => &aggregate.children,
        }
    }

    /// Derived value of this subtree.
    ///
    /// Leaves report [`Payload::value`]; aggregates report the sum over all
    /// leaves below them. Recomputed on every call in O(subtree size), using
    /// an explicit stack rather than recursion.
    #[instrument(level = "debug", skip(self), fields(node = %self.label()))]
    pub fn aggregate_value(&self) -> f64 {
        self.iter()
            .filter_map(|(_, node)| node.payload())
            .map(|payload| payload.value())
            .sum()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Height of this subtree; a single node has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Labels of all leaves, left to right.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label())
            .collect()
    }

    /// Pre-order walk yielding `(depth, node)`, starting at depth 0.
    pub fn iter(&self) -> Walk<'_> {
        Walk::new(self, 0)
    }

    /// Pre-order description of every node, tagged with its indent level.
    ///
    /// The returned iterator is lazy and `Clone`; call again to restart.
    pub fn depth_first_render(&self, depth: usize) -> Render<'_> {
        Render::new(Walk::new(self, depth))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => write!(f, "{} ({})", leaf.label, leaf.payload),
            Node::Aggregate(aggregate) => write!(f, "{}/", aggregate.label),
        }
    }
}
