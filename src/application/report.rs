//! Human-readable reports over hierarchies and operation results.
//!
//! Units, indentation and rounding live here, not in the domain.

use itertools::Itertools;
use tracing::instrument;

use crate::config::Settings;
use crate::domain::{apply_forest, apply_recursive, Node, NodeKind, Operation, TreeNodeConvert};

/// Listing line per node, with units applied.
struct Listing<'a> {
    unit: &'a str,
    precision: usize,
}

impl Operation for Listing<'_> {
    type Output = String;

    fn name(&self) -> &str {
        "listing"
    }

    fn size(&self, label: &str, size: u64) -> String {
        format!("- File: {} ({}{})", label, size, self.unit)
    }

    fn circle(&self, label: &str, radius: f64) -> String {
        format!("- Circle: {} (radius {:.*})", label, self.precision, radius)
    }

    fn rectangle(&self, label: &str, width: f64, height: f64) -> String {
        format!(
            "- Rectangle: {} ({:.*} x {:.*})",
            label, self.precision, width, self.precision, height
        )
    }

    fn aggregate(&self, label: &str, _children: &[&String]) -> String {
        format!("+ Directory: {}", label)
    }
}

fn kind_title(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Size => "File",
        NodeKind::Circle => "Circle",
        NodeKind::Rectangle => "Rectangle",
        NodeKind::Aggregate => "Directory",
    }
}

/// Formats hierarchies according to [`Settings`].
#[derive(Debug, Clone)]
pub struct Report<'a> {
    settings: &'a Settings,
}

impl<'a> Report<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Indented pre-order listing, one line per node.
    #[instrument(level = "debug", skip_all, fields(root = %root.label()))]
    pub fn structure(&self, root: &Node) -> Vec<String> {
        let listing = Listing {
            unit: &self.settings.size_unit,
            precision: self.settings.precision,
        };
        root.iter()
            .zip(apply_recursive(&listing, root))
            .map(|((depth, _), line)| format!("{}{}", " ".repeat(self.settings.indent * depth), line))
            .collect()
    }

    /// Boxed tree view.
    pub fn tree(&self, root: &Node) -> String {
        root.to_tree_string().to_string()
    }

    /// "Total size: 4992KB" style summary of [`Node::aggregate_value`].
    pub fn total(&self, root: &Node) -> String {
        format!(
            "Total size: {}{}",
            root.aggregate_value(),
            self.settings.size_unit
        )
    }

    /// One line per leaf, e.g. "Circle area: 78.54".
    ///
    /// Aggregates are skipped; their values are sums of the leaf lines.
    #[instrument(level = "debug", skip_all, fields(op = metric))]
    pub fn measurements<O>(&self, metric: &str, op: &O, roots: &[Node]) -> Vec<String>
    where
        O: Operation<Output = f64>,
    {
        roots
            .iter()
            .flat_map(|root| root.iter())
            .zip(apply_forest(op, roots))
            .filter(|((_, node), _)| node.is_leaf())
            .map(|((_, node), value)| {
                format!(
                    "{} {}: {:.*}",
                    kind_title(node.kind()),
                    metric,
                    self.settings.precision,
                    value
                )
            })
            .collect()
    }

    /// Joins lines for printing.
    pub fn join(lines: &[String]) -> String {
        lines.iter().join("\n")
    }
}
