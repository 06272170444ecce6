//! Stock operations over the node kinds.
//!
//! Geometric operations treat size leaves as having no extent (`0.0`);
//! aggregates sum their children.

use std::f64::consts::PI;

use crate::domain::dispatch::Operation;

/// Enclosed area: `πr²` for circles, `w·h` for rectangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Area;

impl Operation for Area {
    type Output = f64;

    fn name(&self) -> &str {
        "area"
    }

    fn size(&self, _label: &str, _size: u64) -> f64 {
        0.0
    }

    fn circle(&self, _label: &str, radius: f64) -> f64 {
        PI * radius * radius
    }

    fn rectangle(&self, _label: &str, width: f64, height: f64) -> f64 {
        width * height
    }

    fn aggregate(&self, _label: &str, children: &[&f64]) -> f64 {
        children.iter().copied().sum()
    }
}

/// Outline length: `2πr` for circles, `2(w+h)` for rectangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perimeter;

impl Operation for Perimeter {
    type Output = f64;

    fn name(&self) -> &str {
        "perimeter"
    }

    fn size(&self, _label: &str, _size: u64) -> f64 {
        0.0
    }

    fn circle(&self, _label: &str, radius: f64) -> f64 {
        2.0 * PI * radius
    }

    fn rectangle(&self, _label: &str, width: f64, height: f64) -> f64 {
        2.0 * (width + height)
    }

    fn aggregate(&self, _label: &str, children: &[&f64]) -> f64 {
        children.iter().copied().sum()
    }
}

/// Sum of size leaves; shapes contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalSize;

impl Operation for TotalSize {
    type Output = u64;

    fn name(&self) -> &str {
        "total-size"
    }

    fn size(&self, _label: &str, size: u64) -> u64 {
        size
    }

    fn circle(&self, _label: &str, _radius: f64) -> u64 {
        0
    }

    fn rectangle(&self, _label: &str, _width: f64, _height: f64) -> u64 {
        0
    }

    fn aggregate(&self, _label: &str, children: &[&u64]) -> u64 {
        children.iter().copied().sum()
    }
}

/// Number of leaves in the subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafCount;

impl Operation for LeafCount {
    type Output = usize;

    fn name(&self) -> &str {
        "leaf-count"
    }

    fn size(&self, _label: &str, _size: u64) -> usize {
        1
    }

    fn circle(&self, _label: &str, _radius: f64) -> usize {
        1
    }

    fn rectangle(&self, _label: &str, _width: f64, _height: f64) -> usize {
        1
    }

    fn aggregate(&self, _label: &str, children: &[&usize]) -> usize {
        children.iter().copied().sum()
    }
}

/// One-line description of the node itself, without units or rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Describe;

impl Operation for Describe {
    type Output = String;

    fn name(&self) -> &str {
        "describe"
    }

    fn size(&self, label: &str, size: u64) -> String {
        format!("File: {} ({})", label, size)
    }

    fn circle(&self, label: &str, radius: f64) -> String {
        format!("Circle: {} (radius {})", label, radius)
    }

    fn rectangle(&self, label: &str, width: f64, height: f64) -> String {
        format!("Rectangle: {} ({} x {})", label, width, height)
    }

    fn aggregate(&self, label: &str, children: &[&String]) -> String {
        let noun = if children.len() == 1 { "entry" } else { "entries" };
        format!("Directory: {} ({} {})", label, children.len(), noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{apply, Node};

    #[test]
    fn test_area_uses_full_precision_pi() {
        let circle = Node::circle("c", 5.0).unwrap();
        assert_eq!(apply(&Area, &circle), PI * 25.0);
    }

    #[test]
    fn test_perimeter() {
        let circle = Node::circle("c", 5.0).unwrap();
        let rect = Node::rectangle("r", 4.0, 6.0).unwrap();
        assert_eq!(apply(&Perimeter, &circle), 10.0 * PI);
        assert_eq!(apply(&Perimeter, &rect), 20.0);
    }

    #[test]
    fn test_geometric_ops_ignore_files() {
        let file = Node::file("f", 99);
        assert_eq!(apply(&Area, &file), 0.0);
        assert_eq!(apply(&Perimeter, &file), 0.0);
    }

    #[test]
    fn test_total_size_ignores_shapes() {
        let root = Node::aggregate("root")
            .with_child(Node::file("f", 10))
            .unwrap()
            .with_child(Node::circle("c", 2.0).unwrap())
            .unwrap();
        assert_eq!(apply(&TotalSize, &root), 10);
        assert_eq!(apply(&LeafCount, &root), 2);
    }

    #[test]
    fn test_describe() {
        let root = Node::aggregate("docs").with_child(Node::file("a", 1)).unwrap();
        assert_eq!(apply(&Describe, &root), "Directory: docs (1 entry)");
        assert_eq!(apply(&Describe, &root.children()[0]), "File: a (1)");
        assert_eq!(apply(&Describe, &Node::aggregate("empty")), "Directory: empty (0 entries)");
    }
}
