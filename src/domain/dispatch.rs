//! Operation dispatch over the closed node-kind set.
//!
//! Nodes carry no operation-specific code. The dispatcher matches on the
//! node variant and calls the handler an [`Operation`] provides for that
//! kind. New operations are added by implementing the trait; adding a new
//! node kind means adding a required method here, which breaks every
//! existing operation at compile time until it handles the new kind.

use tracing::{debug, instrument};

use crate::domain::node::{Aggregate, Leaf, Node, Payload};

/// An operation with one handler per node kind.
///
/// None of the per-kind handlers have default bodies, so an implementation that
/// forgets a kind does not compile:
///
/// ```compile_fail
/// use arbor::domain::Operation;
///
/// struct Incomplete;
///
/// impl Operation for Incomplete {
///     type Output = f64;
///     fn size(&self, _label: &str, size: u64) -> f64 { size as f64 }
///     fn circle(&self, _label: &str, radius: f64) -> f64 { radius }
///     fn aggregate(&self, _label: &str, children: &[&f64]) -> f64 { children.iter().copied().sum() }
///     // no rectangle handler
/// }
/// ```
///
/// Handlers only see the node's own fields. The aggregate handler also gets
/// the outputs already computed for its children, in insertion order, and
/// may ignore them. They are borrowed, so `Output` needs no `Clone` and may
/// be a `Result` carrying any error type.
pub trait Operation {
    type Output;

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn size(&self, label: &str, size: u64) -> Self::Output;

    fn circle(&self, label: &str, radius: f64) -> Self::Output;

    fn rectangle(&self, label: &str, width: f64, height: f64) -> Self::Output;

    fn aggregate(&self, label: &str, children: &[&Self::Output]) -> Self::Output;
}

fn dispatch_leaf<O: Operation + ?Sized>(op: &O, leaf: &Leaf) -> O::Output {
    match leaf.payload() {
        Payload::Size { size } => op.size(leaf.label(), size),
        Payload::Circle { radius } => op.circle(leaf.label(), radius),
        Payload::Rectangle { width, height } => op.rectangle(leaf.label(), width, height),
    }
}

fn dispatch<O: Operation + ?Sized>(op: &O, node: &Node) -> O::Output {
    match node {
        Node::Leaf(leaf) => dispatch_leaf(op, leaf),
        Node::Aggregate(aggregate) => {
            let children: Vec<O::Output> = aggregate
                .children()
                .iter()
                .map(|child| dispatch(op, child))
                .collect();
            let borrowed: Vec<&O::Output> = children.iter().collect();
            op.aggregate(aggregate.label(), &borrowed)
        }
    }
}

/// Applies `op` to `node` and returns the handler's output unchanged.
///
/// For an aggregate the children are dispatched first so the aggregate
/// handler can see their outputs. Recursion depth equals tree depth; for
/// very deep trees prefer [`apply_recursive`], which uses an explicit stack.
#[instrument(level = "debug", skip_all, fields(op = op.name(), node = %node.label()))]
pub fn apply<O: Operation + ?Sized>(op: &O, node: &Node) -> O::Output {
    dispatch(op, node)
}

enum Frame<'a> {
    Enter { node: &'a Node, parent: Option<usize> },
    Exit { aggregate: &'a Aggregate, slot: usize },
}

/// Applies `op` to every node of the subtree, returning one output per node
/// in pre-order.
///
/// Each subtree is evaluated once: outputs are produced bottom-up and
/// stored at the node's pre-order position. The outputs are independent;
/// nothing is aggregated here beyond what the aggregate handler does.
#[instrument(level = "debug", skip_all, fields(op = op.name(), root = %root.label()))]
pub fn apply_recursive<O: Operation + ?Sized>(op: &O, root: &Node) -> Vec<O::Output> {
    let mut results: Vec<Option<O::Output>> = Vec::new();
    let mut child_slots: Vec<Vec<usize>> = Vec::new();
    let mut stack = vec![Frame::Enter {
        node: root,
        parent: None,
    }];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter { node, parent } => {
                let slot = results.len();
                results.push(None);
                child_slots.push(Vec::new());
                if let Some(parent) = parent {
                    child_slots[parent].push(slot);
                }
                match node {
                    Node::Leaf(leaf) => results[slot] = Some(dispatch_leaf(op, leaf)),
                    Node::Aggregate(aggregate) => {
                        // Exit runs after every child frame above it
                        stack.push(Frame::Exit { aggregate, slot });
                        for child in aggregate.children().iter().rev() {
                            stack.push(Frame::Enter {
                                node: child,
                                parent: Some(slot),
                            });
                        }
                    }
                }
            }
            Frame::Exit { aggregate, slot } => {
                let children: Vec<&O::Output> = child_slots[slot]
                    .iter()
                    .filter_map(|&child| results[child].as_ref())
                    .collect();
                let output = op.aggregate(aggregate.label(), &children);
                results[slot] = Some(output);
            }
        }
    }

    debug!(nodes = results.len(), "applied operation");
    results.into_iter().flatten().collect()
}

/// [`apply_recursive`] over a sequence of independent roots, concatenated
/// in order.
pub fn apply_forest<O: Operation + ?Sized>(op: &O, roots: &[Node]) -> Vec<O::Output> {
    roots
        .iter()
        .flat_map(|root| apply_recursive(op, root))
        .collect()
}
