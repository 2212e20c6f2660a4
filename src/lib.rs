//! Internal library crate for folder-search.
//!
//! The shipped application is the `fds` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `fds` binary and is not considered a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod ui;
pub mod utils;
