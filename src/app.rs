//! Application state for folder-search.
//!
//! - [nav]: the navigation controller, owner of the current path and listing.
//! - [state]: interactive session state wrapping the controller (cursor, input mode).
//! - [keymap]: key strings from the config mapped to actions.
//! - [handlers]: the per-action key handlers of [AppState].

pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod state;

pub use nav::{ErrorPolicy, NavPhase, Navigator, ViewModel};
pub(crate) use state::{AppState, InputMode, KeypressResult};
