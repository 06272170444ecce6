//! Pre-order traversal over a borrowed hierarchy.

use std::fmt;

use crate::domain::node::Node;

/// Depth-first, pre-order iterator yielding `(depth, node)`.
///
/// Uses an explicit stack, so traversal depth is not limited by the call
/// stack. Children are visited in insertion order. Reported depths
/// saturate at `usize::MAX`.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a Node, depth: usize) -> Self {
        Self {
            stack: vec![(depth, root)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        let child_depth = depth.saturating_add(1);
        for child in node.children().iter().rev() {
            self.stack.push((child_depth, child));
        }
        Some((depth, node))
    }
}

/// One line of a rendered hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub depth: usize,
    pub line: String,
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "  ".repeat(self.depth), self.line)
    }
}

/// Lazy pre-order rendering of a hierarchy, see [`Node::depth_first_render`].
#[derive(Debug, Clone)]
pub struct Render<'a> {
    walk: Walk<'a>,
}

impl<'a> Render<'a> {
    pub(crate) fn new(walk: Walk<'a>) -> Self {
        Self { walk }
    }
}

impl Iterator for Render<'_> {
    type Item = RenderLine;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|(depth, node)| RenderLine {
            depth,
            line: node.to_string(),
        })
    }
}
