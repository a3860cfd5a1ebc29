//! Markdown rendering for transcript messages.
//!
//! Content is parsed with pulldown-cmark and laid out into ratatui lines
//! that are already wrapped to the pane width, so the transcript can count
//! rows exactly when it scrolls.

mod collapse;
mod render;
mod table;

pub use collapse::{collapsed_preview, needs_collapse, PREVIEW_GRAPHEMES};
pub use render::{render_content, render_markdown, render_plain, RenderOptions};
