use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::panes::{clamp_ratio, DEFAULT_RECENT_ACTIVITY_WINDOW, DEFAULT_SPLIT_RATIO};
use crate::core::registry::{self, AgentDescriptor};
use crate::core::simulation::DEFAULT_RESPONSE_DELAY;

/// Messages longer than this many characters start collapsed.
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 1000;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Agent id selected at startup (e.g., "gpt-4o")
    pub default_agent: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Enable markdown rendering in the transcript
    pub markdown: Option<bool>,
    /// Enable syntax highlighting for fenced code blocks when markdown is enabled
    pub syntax: Option<bool>,
    /// Delay before the simulated agent answers, in milliseconds
    pub response_delay_ms: Option<u64>,
    /// How long the action pane shows its activity badge, in seconds
    pub recent_activity_secs: Option<u64>,
    /// Character count above which messages start collapsed
    pub collapse_threshold: Option<usize>,
    /// Initial transcript width in percent (clamped to 20..=80)
    pub split_ratio: Option<f64>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn default_agent(&self) -> &'static AgentDescriptor {
        self.default_agent
            .as_deref()
            .and_then(registry::find)
            .unwrap_or_else(registry::default_agent)
    }

    pub fn dark_mode(&self) -> bool {
        !matches!(
            self.theme.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("light")
        )
    }

    pub fn markdown_enabled(&self) -> bool {
        self.markdown.unwrap_or(true)
    }

    pub fn syntax_enabled(&self) -> bool {
        self.syntax.unwrap_or(true)
    }

    pub fn response_delay(&self) -> Duration {
        self.response_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESPONSE_DELAY)
    }

    pub fn recent_activity_window(&self) -> Duration {
        self.recent_activity_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RECENT_ACTIVITY_WINDOW)
    }

    pub fn collapse_threshold(&self) -> usize {
        self.collapse_threshold
            .unwrap_or(DEFAULT_COLLAPSE_THRESHOLD)
    }

    pub fn initial_split_ratio(&self) -> f64 {
        clamp_ratio(self.split_ratio.unwrap_or(DEFAULT_SPLIT_RATIO))
    }
}
