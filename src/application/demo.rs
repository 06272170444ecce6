//! Canonical sample hierarchies.

use crate::domain::{DomainResult, Node};

/// Small file system: two directories of files plus a top-level file.
///
/// ```text
/// root/
/// ├── documents/  report.pdf 1024, notes.txt 256
/// ├── images/     photo1.jpg 2048, photo2.jpg 1536
/// └── readme.md   128
/// ```
pub fn file_system_sample() -> DomainResult<Node> {
    let mut docs = Node::aggregate("documents");
    docs.append_child(Node::file("report.pdf", 1024))?;
    docs.append_child(Node::file("notes.txt", 256))?;

    let mut images = Node::aggregate("images");
    images.append_child(Node::file("photo1.jpg", 2048))?;
    images.append_child(Node::file("photo2.jpg", 1536))?;

    let mut root = Node::aggregate("root");
    root.append_child(docs)?;
    root.append_child(images)?;
    root.append_child(Node::file("readme.md", 128))?;
    Ok(root)
}

/// A circle of radius 5 and a 4 x 6 rectangle.
pub fn shapes_sample() -> DomainResult<Vec<Node>> {
    Ok(vec![
        Node::circle("circle", 5.0)?,
        Node::rectangle("rectangle", 4.0, 6.0)?,
    ])
}
