//! Builds a size hierarchy from a directory on disk.
//!
//! Directories become aggregates and regular files become size leaves
//! holding their size in kilobytes, rounded up. Entries are visited in file
//! name order so the resulting child order is deterministic. Symlinks are
//! not followed and are skipped.

use std::path::Path;

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Node;

/// Options for [`scan_directory`].
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Maximum depth below the root; deeper entries are ignored.
    pub max_depth: Option<usize>,
    /// Include entries whose name starts with a dot.
    pub include_hidden: bool,
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

fn label_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Pops the innermost open directory into its parent.
fn close_directory(open: &mut Vec<Node>) -> ApplicationResult<()> {
    if open.len() < 2 {
        return Ok(());
    }
    if let Some(finished) = open.pop() {
        if let Some(parent) = open.last_mut() {
            parent.append_child(finished)?;
        }
    }
    Ok(())
}

/// Scan `root` into a hierarchy.
///
/// A regular file as `root` yields a single leaf.
#[instrument(level = "debug", skip(options))]
pub fn scan_directory(root: &Path, options: &ScanOptions) -> ApplicationResult<Node> {
    if !root.exists() {
        return Err(ApplicationError::OperationFailed {
            context: format!("scan: {}", root.display()),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "path does not exist",
            )),
        });
    }

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    // Directories currently open along the walk; index == depth
    let mut open: Vec<Node> = Vec::new();
    let include_hidden = options.include_hidden;
    let entries = walker.into_iter().filter_entry(move |entry| {
        entry.depth() == 0 || include_hidden || !is_hidden(&entry.file_name().to_string_lossy())
    });

    for entry in entries {
        let entry = entry.with_path_context("walk", root)?;
        let depth = entry.depth();
        while open.len() > depth {
            close_directory(&mut open)?;
        }

        let file_type = entry.file_type();
        let label = label_of(entry.path());
        if file_type.is_dir() {
            trace!(depth, %label, "directory");
            open.push(Node::aggregate(label));
        } else if file_type.is_file() {
            let bytes = entry
                .metadata()
                .with_path_context("read metadata", entry.path())?
                .len();
            let leaf = Node::file(label, bytes.div_ceil(1024));
            match open.last_mut() {
                Some(parent) => parent.append_child(leaf)?,
                None => return Ok(leaf),
            }
        } else {
            debug!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }

    while open.len() > 1 {
        close_directory(&mut open)?;
    }
    open.pop().ok_or_else(|| ApplicationError::OperationFailed {
        context: format!("scan: {}", root.display()),
        source: Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a directory or regular file",
        )),
    })
}
