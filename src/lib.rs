//! AgentDeck is a terminal console for a chat-style AI agent.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the conversation, the action log, the
//!   pane layout, the agent registry and the boundary to agent backends.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`utils`] holds logging setup and text helpers shared by both.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which loads configuration and dispatches
//! into [`ui::chat_loop`] for interactive sessions.

pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
