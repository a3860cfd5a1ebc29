//! Split-pane coordination between the transcript and the action view.
//!
//! The coordinator owns the split ratio, the resize drag flag and which
//! pane (if any) is shown at full width. It never touches conversation
//! data; it only decides how the body area is divided.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::core::message::AgentAction;

pub const MIN_SPLIT_RATIO: f64 = 20.0;
pub const MAX_SPLIT_RATIO: f64 = 80.0;
pub const DEFAULT_SPLIT_RATIO: f64 = 50.0;

/// Default window for the "recent activity" badge on the action pane.
pub const DEFAULT_RECENT_ACTIVITY_WINDOW: Duration = Duration::from_secs(30);

/// Which pane, if any, takes the whole body width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneMode {
    #[default]
    Split,
    ChatFull,
    VisualizationFull,
}

/// Horizontal extent of the container the divider moves within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub left: f64,
    pub width: f64,
}

impl ContainerBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// Width of each pane in percent of the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneWidths {
    pub chat: f64,
    pub visualization: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    split_ratio: f64,
    is_resizing: bool,
    mode: PaneMode,
}

impl Default for PaneLayout {
    fn default() -> Self {
        Self::new(DEFAULT_SPLIT_RATIO)
    }
}

pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return DEFAULT_SPLIT_RATIO;
    }
    ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
}

impl PaneLayout {
    pub fn new(initial_ratio: f64) -> Self {
        Self {
            split_ratio: clamp_ratio(initial_ratio),
            is_resizing: false,
            mode: PaneMode::Split,
        }
    }

    pub fn split_ratio(&self) -> f64 {
        self.split_ratio
    }

    pub fn is_resizing(&self) -> bool {
        self.is_resizing
    }

    pub fn mode(&self) -> PaneMode {
        self.mode
    }

    pub fn show_full_chat(&self) -> bool {
        self.mode == PaneMode::ChatFull
    }

    pub fn show_full_visualization(&self) -> bool {
        self.mode == PaneMode::VisualizationFull
    }

    pub fn begin_resize(&mut self) {
        if !self.is_resizing {
            debug!(ratio = self.split_ratio, "resize started");
        }
        self.is_resizing = true;
    }

    /// Recompute the ratio from the pointer position while a drag is active.
    ///
    /// The result depends only on `pointer_x` and `bounds`, never on the
    /// previous ratio, so it can be sampled on every pointer move.
    pub fn update_resize(&mut self, pointer_x: f64, bounds: ContainerBounds) {
        if !self.is_resizing {
            return;
        }
        if bounds.width.is_nan() || bounds.width <= 0.0 || !pointer_x.is_finite() {
            return;
        }
        let ratio = 100.0 * (pointer_x - bounds.left) / bounds.width;
        self.split_ratio = clamp_ratio(ratio);
    }

    pub fn end_resize(&mut self) {
        if self.is_resizing {
            debug!(ratio = self.split_ratio, "resize finished");
        }
        self.is_resizing = false;
    }

    pub fn toggle_full_chat(&mut self) {
        self.mode = match self.mode {
            PaneMode::ChatFull => PaneMode::Split,
            _ => PaneMode::ChatFull,
        };
    }

    pub fn toggle_full_visualization(&mut self) {
        self.mode = match self.mode {
            PaneMode::VisualizationFull => PaneMode::Split,
            _ => PaneMode::VisualizationFull,
        };
    }

    pub fn widths(&self) -> PaneWidths {
        let chat = match self.mode {
            PaneMode::ChatFull => 100.0,
            PaneMode::VisualizationFull => 0.0,
            PaneMode::Split => self.split_ratio,
        };
        PaneWidths {
            chat,
            visualization: 100.0 - chat,
        }
    }

    /// Divide `total` terminal columns into (chat, visualization) widths.
    pub fn column_split(&self, total: u16) -> (u16, u16) {
        let chat_pct = self.widths().chat;
        let chat = ((total as f64) * chat_pct / 100.0).round() as u16;
        let chat = chat.min(total);
        (chat, total - chat)
    }
}

/// True when the newest action happened within `window` of `now`.
pub fn has_recent_activity(
    actions: &[AgentAction],
    now: DateTime<Local>,
    window: Duration,
) -> bool {
    let Some(latest) = actions.iter().map(|action| action.timestamp).max() else {
        return false;
    };
    let elapsed = now.signed_duration_since(latest);
    match elapsed.to_std() {
        Ok(elapsed) => elapsed <= window,
        // Timestamps slightly in the future count as recent.
        Err(_) => true,
    }
}
