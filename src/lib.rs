//! Part-whole node hierarchies with bottom-up aggregation, and operations
//! dispatched per node kind without touching the node types.
//!
//! Layers:
//! - [`domain`]: nodes, traversal, the [`domain::Operation`] trait and dispatch
//! - [`application`]: sample hierarchies, directory scanning, text reports
//! - [`cli`]: the `arbor` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
