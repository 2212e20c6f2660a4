//! Miscellaneous utility functions for folder-search.
//!
//! - [cli]: command line parsing and help output
//! - [helpers]: color parsing, home path shortening, start directory resolution
//! - [logging]: the log file subscriber

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{get_home, parse_color, resolve_initial_dir, shorten_home_path};
pub use logging::init_logging;
