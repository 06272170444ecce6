//! Application layer: collaborators around the core
//!
//! Builds hierarchies (samples, directory scans) and turns operation
//! results into human-readable text. Depends on the domain layer only.

pub mod demo;
pub mod error;
pub mod error_ext;
pub mod report;
pub mod scan;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use report::Report;
pub use scan::{scan_directory, ScanOptions};
