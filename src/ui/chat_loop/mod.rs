//! Main chat event loop.
//!
//! Terminal input is read on a background task, resolved through the
//! mode-aware keybinding registry and applied to the shared [`App`] as
//! [`AppAction`](crate::core::app::AppAction)s. Agent responses arrive on a
//! separate channel and are folded in the same way.

mod event_loop;
mod keybindings;
mod lifecycle;
mod mouse;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::app::App;

pub use event_loop::{run_chat, UiEvent};

/// Shared, lock-guarded access to the application state.
#[derive(Clone)]
pub struct AppHandle(Arc<Mutex<App>>);

impl AppHandle {
    pub fn new(app: Arc<Mutex<App>>) -> Self {
        Self(app)
    }

    pub async fn read<R>(&self, f: impl FnOnce(&App) -> R) -> R {
        let guard = self.0.lock().await;
        f(&guard)
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.0.lock().await;
        f(&mut guard)
    }
}
