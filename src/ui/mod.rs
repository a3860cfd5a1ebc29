//! Terminal UI layer for the agent console.
//!
//! The UI module owns rendering, layout, keyboard and mouse handling, and
//! loop control for the text user interface.
//!
//! Key submodules include:
//! - [`chat_loop`]: the main interaction loop that turns terminal events
//!   into [`crate::core::app::AppAction`]s and drives agent responses.
//! - [`renderer`]: frame composition for the title bar, the two panes, the
//!   input box and overlays.
//! - [`transcript`], [`actions_view`] and [`markdown`]: content of the chat
//!   and action visualization panes.
//! - [`picker`] and [`dashboard_view`]: overlays.
//! - [`theme`]: light and dark style palettes.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns domain logic and backend coordination.

pub mod actions_view;
pub mod chat_loop;
pub mod dashboard_view;
pub mod markdown;
pub mod picker;
pub mod renderer;
pub mod syntax;
pub mod theme;
pub mod title;
pub mod transcript;
pub mod wrap;
