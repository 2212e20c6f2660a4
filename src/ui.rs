//! Terminal UI for folder-search.
//!
//! [render] draws one frame from the session state; [widgets] holds the small
//! drawing and width helpers it uses.

pub mod render;
pub mod widgets;

pub(crate) use render::render;
