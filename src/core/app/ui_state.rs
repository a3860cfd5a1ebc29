use std::collections::HashSet;
use std::time::{Duration, Instant};

use ratatui::layout::{Rect, Size};
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::core::app::dashboard::DashboardState;
use crate::core::app::picker::AgentPickerState;
use crate::core::config::Config;
use crate::core::panes::PaneLayout;
use crate::ui::theme::Theme;

/// Which region receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiFocus {
    #[default]
    Input,
    Transcript,
    Actions,
}

impl UiFocus {
    pub fn next(self) -> Self {
        match self {
            UiFocus::Input => UiFocus::Transcript,
            UiFocus::Transcript => UiFocus::Actions,
            UiFocus::Actions => UiFocus::Input,
        }
    }
}

/// Screen regions recorded by the renderer on every frame so mouse
/// events can be mapped back onto panes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRegions {
    pub body: Rect,
    pub transcript: Rect,
    pub actions: Rect,
    pub divider_x: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub dark_mode: bool,
    pub theme: Theme,
    pub panes: PaneLayout,
    pub dashboard_open: bool,
    pub dashboard: DashboardState,
    pub picker: Option<AgentPickerState>,
    pub focus: UiFocus,
    textarea: TextArea<'static>,
    pub transcript_scroll: u16,
    pub auto_scroll: bool,
    pub actions_scroll: u16,
    pub selected_message: Option<usize>,
    pub scroll_selection_into_view: bool,
    expanded: HashSet<String>,
    pub markdown_enabled: bool,
    pub syntax_enabled: bool,
    pub collapse_threshold: usize,
    pub recent_activity_window: Duration,
    pub pulse_start: Instant,
    pub exit_requested: bool,
    pub last_term_size: Size,
    pub regions: FrameRegions,
}

impl UiState {
    pub(crate) fn from_config(config: &Config, dark_mode: bool) -> Self {
        let mut state = Self {
            dark_mode,
            theme: Theme::for_mode(dark_mode),
            panes: PaneLayout::new(config.initial_split_ratio()),
            dashboard_open: false,
            dashboard: DashboardState::default(),
            picker: None,
            focus: UiFocus::Input,
            textarea: TextArea::default(),
            transcript_scroll: 0,
            auto_scroll: true,
            actions_scroll: 0,
            selected_message: None,
            scroll_selection_into_view: false,
            expanded: HashSet::new(),
            markdown_enabled: config.markdown_enabled(),
            syntax_enabled: config.syntax_enabled(),
            collapse_threshold: config.collapse_threshold(),
            recent_activity_window: config.recent_activity_window(),
            pulse_start: Instant::now(),
            exit_requested: false,
            last_term_size: Size::default(),
            regions: FrameRegions::default(),
        };
        state.configure_textarea();
        state
    }

    pub(crate) fn configure_textarea(&mut self) {
        let textarea_style = self
            .theme
            .input_text_style
            .patch(Style::default().bg(self.theme.background_color));
        self.textarea.set_style(textarea_style);
        self.textarea
            .set_cursor_style(self.theme.input_cursor_style);
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea
            .set_placeholder_text("Type your message... (Enter to send, Alt+Enter for newline)");
        self.textarea
            .set_placeholder_style(self.theme.placeholder_style);
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme = Theme::for_mode(self.dark_mode);
        self.configure_textarea();
    }

    pub fn toggle_dashboard(&mut self) {
        self.dashboard_open = !self.dashboard_open;
    }

    pub fn close_dashboard(&mut self) {
        self.dashboard_open = false;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
        if self.focus != UiFocus::Transcript {
            self.selected_message = None;
        }
    }

    pub fn is_input_focused(&self) -> bool {
        self.focus == UiFocus::Input
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.configure_textarea();
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len().max(1)
    }

    pub fn is_expanded(&self, message_id: &str) -> bool {
        self.expanded.contains(message_id)
    }

    pub fn toggle_expanded(&mut self, message_id: &str) -> bool {
        if !self.expanded.remove(message_id) {
            self.expanded.insert(message_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn scroll_transcript(&mut self, lines: i32) {
        if lines < 0 {
            self.auto_scroll = false;
        }
        self.transcript_scroll = offset_by(self.transcript_scroll, lines);
    }

    pub fn scroll_actions(&mut self, lines: i32) {
        self.actions_scroll = offset_by(self.actions_scroll, lines);
    }

    /// Keep the transcript pinned to the newest line.
    pub fn follow_transcript(&mut self) {
        self.auto_scroll = true;
    }

    pub fn select_previous_message(&mut self, message_count: usize) {
        if message_count == 0 {
            self.selected_message = None;
            return;
        }
        self.selected_message = Some(match self.selected_message {
            Some(0) => message_count - 1,
            Some(index) => index.min(message_count) - 1,
            None => message_count - 1,
        });
        self.auto_scroll = false;
        self.scroll_selection_into_view = true;
    }

    pub fn select_next_message(&mut self, message_count: usize) {
        if message_count == 0 {
            self.selected_message = None;
            return;
        }
        self.selected_message = Some(match self.selected_message {
            Some(index) if index + 1 < message_count => index + 1,
            Some(_) => 0,
            None => 0,
        });
        self.auto_scroll = false;
        self.scroll_selection_into_view = true;
    }

    pub fn activity_pulse(&self) -> Duration {
        self.pulse_start.elapsed()
    }
}

fn offset_by(current: u16, lines: i32) -> u16 {
    if lines < 0 {
        current.saturating_sub(lines.unsigned_abs().min(u16::MAX as u32) as u16)
    } else {
        current.saturating_add(lines.min(u16::MAX as i32) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UiState {
        UiState::from_config(&Config::default(), true)
    }

    #[test]
    fn focus_cycles_through_three_regions() {
        let mut ui = state();
        assert_eq!(ui.focus, UiFocus::Input);
        ui.cycle_focus();
        assert_eq!(ui.focus, UiFocus::Transcript);
        ui.cycle_focus();
        assert_eq!(ui.focus, UiFocus::Actions);
        ui.cycle_focus();
        assert!(ui.is_input_focused());
    }

    #[test]
    fn theme_toggle_swaps_palette() {
        let mut ui = state();
        ui.toggle_theme();
        assert!(!ui.dark_mode);
        assert_eq!(ui.theme, Theme::light());
        ui.toggle_theme();
        assert!(ui.dark_mode);
    }

    #[test]
    fn dashboard_toggle_and_close() {
        let mut ui = state();
        ui.toggle_dashboard();
        assert!(ui.dashboard_open);
        ui.close_dashboard();
        assert!(!ui.dashboard_open);
        ui.close_dashboard();
        assert!(!ui.dashboard_open);
    }

    #[test]
    fn expansion_is_tracked_per_id() {
        let mut ui = state();
        assert!(ui.toggle_expanded("msg-1"));
        assert!(ui.is_expanded("msg-1"));
        assert!(!ui.is_expanded("msg-2"));
        assert!(!ui.toggle_expanded("msg-1"));
        assert!(!ui.is_expanded("msg-1"));
    }

    #[test]
    fn scrolling_up_disables_follow() {
        let mut ui = state();
        ui.transcript_scroll = 10;
        ui.scroll_transcript(-3);
        assert_eq!(ui.transcript_scroll, 7);
        assert!(!ui.auto_scroll);
        ui.scroll_transcript(-100);
        assert_eq!(ui.transcript_scroll, 0);
    }

    #[test]
    fn message_selection_wraps() {
        let mut ui = state();
        ui.select_previous_message(3);
        assert_eq!(ui.selected_message, Some(2));
        ui.select_next_message(3);
        assert_eq!(ui.selected_message, Some(0));
        ui.select_previous_message(3);
        assert_eq!(ui.selected_message, Some(2));
        ui.select_next_message(0);
        assert_eq!(ui.selected_message, None);
    }

    #[test]
    fn input_text_joins_lines() {
        let mut ui = state();
        ui.apply_textarea_edit(|ta| {
            ta.insert_str("hello\nworld");
        });
        assert_eq!(ui.get_input_text(), "hello\nworld");
        assert_eq!(ui.input_line_count(), 2);
        ui.clear_input();
        assert_eq!(ui.get_input_text(), "");
    }
}
