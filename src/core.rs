//! Core runtime logic for folder-search.
//!
//! This module contains the non-UI pieces used by the application:
//! - [filter]: listing and filtering the child directories of one directory.
//! - [paths]: lexical path arithmetic for navigation.
//! - [worker]: the background scan thread and its request/response handoff.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod filter;
pub mod paths;
pub mod terminal;
pub mod worker;

pub use filter::{ScanResult, SearchOptions, list};
pub use worker::{ScanRequest, ScanResponse, ScanWorker};
