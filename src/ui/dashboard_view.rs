//! Settings drawer rendered over the right edge of the screen.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::app::{DashboardField, DashboardState};
use crate::ui::theme::Theme;

pub const DRAWER_MAX_WIDTH: u16 = 48;

/// Right-aligned drawer, at most `DRAWER_MAX_WIDTH` columns wide.
pub fn drawer_area(area: Rect) -> Rect {
    let width = area.width.min(DRAWER_MAX_WIDTH);
    Rect::new(area.x + area.width - width, area.y, width, area.height)
}

fn section_title(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), theme.heading_style))
}

fn field_label(field: DashboardField, state: &DashboardState, theme: &Theme) -> Line<'static> {
    let focused = state.focused == field;
    let marker = if focused { "› " } else { "  " };
    let style = if focused {
        theme.focused_field_style
    } else {
        theme.overlay_style
    };
    Line::from(vec![
        Span::styled(marker, theme.focused_field_style),
        Span::styled(field.label().to_string(), style),
    ])
}

pub fn preference_line(field: DashboardField, state: &DashboardState, theme: &Theme) -> Line<'static> {
    let on = state.preference(field).unwrap_or(false);
    let mut line = field_label(field, state, theme);
    let switch = if on { " [●━] on" } else { " [━○] off" };
    let style = if on {
        theme.badge_style
    } else {
        theme.placeholder_style
    };
    line.spans.push(Span::raw("  "));
    line.spans.push(Span::styled(switch, style));
    line
}

pub fn render_dashboard(frame: &mut Frame, state: &DashboardState, theme: &Theme) {
    let area = drawer_area(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Dashboard ")
        .title_style(theme.title_style)
        .title_bottom(Line::from(" Tab next • Space toggle • Esc close ").style(theme.timestamp_style))
        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
        .border_style(theme.border_style)
        .style(theme.overlay_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [keys_title, openai_label, openai_input, anthropic_label, anthropic_input, _, rest] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

    frame.render_widget(Paragraph::new(section_title("API Keys", theme)), keys_title);
    render_key_field(frame, state, DashboardField::OpenAiKey, openai_label, openai_input, theme);
    render_key_field(
        frame,
        state,
        DashboardField::AnthropicKey,
        anthropic_label,
        anthropic_input,
        theme,
    );

    let mut lines = vec![section_title("Recent Chats", theme)];
    for chat in &state.recent_chats {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", chat.title), theme.overlay_style),
            Span::styled(
                format!("  {}", chat.date.format("%Y-%m-%d")),
                theme.timestamp_style,
            ),
        ]));
    }
    lines.push(Line::default());
    lines.push(section_title("Preferences", theme));
    lines.push(preference_line(DashboardField::AutoSelectModel, state, theme));
    lines.push(preference_line(DashboardField::SaveChatHistory, state, theme));
    frame.render_widget(Paragraph::new(lines), rest);
}

fn render_key_field(
    frame: &mut Frame,
    state: &DashboardState,
    field: DashboardField,
    label_area: Rect,
    input_area: Rect,
    theme: &Theme,
) {
    frame.render_widget(Paragraph::new(field_label(field, state, theme)), label_area);
    let Some(textarea) = state.key_field(field) else {
        return;
    };
    let border_style = if state.focused == field {
        theme.focused_field_style
    } else {
        theme.border_style
    };
    // Render a styled clone so the stored field keeps no theme state
    let mut textarea = textarea.clone();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    textarea.set_style(theme.input_text_style);
    if state.focused == field {
        textarea.set_cursor_style(theme.input_cursor_style);
    } else {
        textarea.set_cursor_style(theme.input_text_style);
    }
    frame.render_widget(&textarea, input_area);
}
