use termtree::Tree;
use tracing::instrument;

use crate::domain::node::Node;

/// Conversion into a [`termtree::Tree`] for boxed terminal display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Node {
    #[instrument(level = "trace", skip(self), fields(node = %self.label()))]
    fn to_tree_string(&self) -> Tree<String> {
        // Recursively construct the children
        let leaves: Vec<_> = self.children().iter().map(|c| c.to_tree_string()).collect();
        Tree::new(self.to_string()).with_leaves(leaves)
    }
}
