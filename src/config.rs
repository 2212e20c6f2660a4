//! Configuration for folder-search.
//!
//! Settings are read once at startup from `config.toml` (see [Config::default_path])
//! and are read-only afterwards:
//! - [general]: search defaults, error policy, log level
//! - [input]: keybindings
//! - [theme]: colors handed to the renderer
//!
//! Command line flags are applied on top of these by the entry point.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::General;
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use theme::{ColorPair, Theme};
