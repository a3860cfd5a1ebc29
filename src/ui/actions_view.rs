//! Action visualization pane.

use ratatui::text::{Line, Span};

use crate::core::message::{ActionKind, ActionStatus, AgentAction};
use crate::ui::theme::Theme;
use crate::ui::wrap::{line_width, wrap_spans};
use crate::utils::text::fit_to_width;

const RESULT_INDENT: &str = "    ";
const STEP_INDENT: &str = "    ";

pub const EMPTY_PLACEHOLDER: &str = "No actions yet. Agent activity will appear here.";

pub fn action_icon(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::WebNavigation => "🌐",
        ActionKind::CodeExecution => "⚡",
        ActionKind::FileOperation => "📄",
    }
}

fn status_label(status: ActionStatus) -> &'static str {
    match status {
        ActionStatus::Pending => "PENDING",
        ActionStatus::Completed => "DONE",
        ActionStatus::Error => "ERROR",
    }
}

/// Render the action log, oldest first.
pub fn build_action_lines(actions: &[AgentAction], theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width).max(10);
    if actions.is_empty() {
        return vec![Line::from(Span::styled(EMPTY_PLACEHOLDER, theme.placeholder_style))];
    }

    let mut lines = Vec::new();
    for (index, action) in actions.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.extend(render_action(action, theme, width));
    }
    lines
}

fn render_action(action: &AgentAction, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let status_style = theme.action_status_style(action.status);
    let badge = format!(" {} ", status_label(action.status));
    let time = action.timestamp.format("%H:%M:%S").to_string();

    // icon (2 columns) + space, description, then badge and time on the right
    let trailer_width = badge.chars().count() + 1 + time.len();
    let description_width = width.saturating_sub(3 + trailer_width + 1).max(1);
    let mut description = wrap_spans(
        &[Span::styled(action.description.clone(), theme.action_title_style)],
        description_width,
    )
    .into_iter();

    let mut first = vec![Span::raw(format!("{} ", action_icon(action.kind)))];
    let first_line = description.next().unwrap_or_default();
    let used = 3 + line_width(&first_line);
    first.extend(first_line);
    first.push(Span::raw(" ".repeat(width.saturating_sub(used + trailer_width).max(1))));
    first.push(Span::styled(badge, status_style));
    first.push(Span::raw(" "));
    first.push(Span::styled(time, theme.timestamp_style));
    lines.push(Line::from(first));
    for rest in description {
        let mut spans = vec![Span::raw("   ")];
        spans.extend(rest);
        lines.push(Line::from(spans));
    }

    if let Some(result) = action.result.as_deref() {
        let result_style = if action.status == ActionStatus::Error {
            theme.action_result_style.patch(status_style)
        } else {
            theme.action_result_style
        };
        let inner = width.saturating_sub(RESULT_INDENT.len()).max(1);
        for raw in result.lines() {
            for wrapped in wrap_spans(&[Span::styled(raw.to_string(), result_style)], inner) {
                let mut spans = vec![Span::raw(RESULT_INDENT)];
                spans.extend(wrapped);
                lines.push(Line::from(spans));
            }
        }
    }

    for (number, step) in action.steps().iter().enumerate() {
        let prefix = format!("{STEP_INDENT}{}. ", number + 1);
        let text = format!("[{}] {}", step.kind.as_str(), step.description);
        let available = width.saturating_sub(prefix.chars().count());
        lines.push(Line::from(vec![
            Span::styled(prefix, theme.timestamp_style),
            Span::styled(fit_to_width(&text, available), theme.action_step_style),
        ]));
    }

    if action.kind == ActionKind::WebNavigation {
        if let Some(url) = action.embedded_url() {
            lines.push(screenshot_strip(url, theme, width));
        }
    }
    lines
}

fn screenshot_strip(url: &str, theme: &Theme, width: usize) -> Line<'static> {
    let label = "▣ screenshot: ";
    let available = width.saturating_sub(RESULT_INDENT.len() + label.chars().count());
    Line::from(vec![
        Span::raw(RESULT_INDENT),
        Span::styled(label, theme.badge_style),
        Span::styled(fit_to_width(url, available), theme.link_style),
    ])
}
