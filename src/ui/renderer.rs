use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::app::{App, FrameRegions, UiFocus};
use crate::core::panes::has_recent_activity;
use crate::ui::actions_view::build_action_lines;
use crate::ui::dashboard_view::render_dashboard;
use crate::ui::picker::render_agent_picker;
use crate::ui::title::build_main_title;
use crate::ui::transcript::build_transcript;

const MAX_INPUT_LINES: usize = 6;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.ui.theme.background_color)),
        area,
    );

    let input_height = app.ui.input_line_count().min(MAX_INPUT_LINES) as u16 + 2;
    let [title_area, body, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(input_height),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(build_main_title(app, title_area.width)),
        title_area,
    );

    let (chat_cols, actions_cols) = app.ui.panes.column_split(body.width);
    let transcript_area = Rect::new(body.x, body.y, chat_cols, body.height);
    let actions_area = Rect::new(body.x + chat_cols, body.y, actions_cols, body.height);
    let divider_x = (chat_cols > 0 && actions_cols > 0).then_some(body.x + chat_cols);
    app.ui.regions = FrameRegions {
        body,
        transcript: transcript_area,
        actions: actions_area,
        divider_x,
    };

    if chat_cols > 0 {
        render_transcript(f, app, transcript_area);
    }
    if actions_cols > 0 {
        render_actions(f, app, actions_area, divider_x.is_some());
    }
    render_input(f, app, input_area);

    if app.ui.dashboard_open {
        render_dashboard(f, &app.ui.dashboard, &app.ui.theme);
    }
    if let Some(picker) = app.ui.picker.as_ref() {
        render_agent_picker(f, picker, app.session.selected_agent.id, &app.ui.theme);
    }
}

fn pane_border_style(app: &App, focus: UiFocus) -> Style {
    if app.ui.focus == focus {
        app.ui.theme.focused_field_style
    } else {
        app.ui.theme.border_style
    }
}

fn to_u16(value: usize) -> u16 {
    value.min(u16::MAX as usize) as u16
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Chat ")
        .title_style(app.ui.theme.title_style)
        .borders(Borders::TOP)
        .border_style(pane_border_style(app, UiFocus::Transcript));
    let inner = block.inner(area);
    let view = build_transcript(app, inner.width);

    let height = usize::from(inner.height);
    let max_scroll = view.lines.len().saturating_sub(height);
    let mut scroll = usize::from(app.ui.transcript_scroll);

    if app.ui.scroll_selection_into_view {
        app.ui.scroll_selection_into_view = false;
        if let Some((start, end)) = app
            .ui
            .selected_message
            .and_then(|index| view.message_range(index))
        {
            if start < scroll {
                scroll = start;
            } else if end > scroll + height {
                scroll = start.min(end.saturating_sub(height));
            }
        }
    } else if app.ui.auto_scroll {
        scroll = max_scroll;
    }

    scroll = scroll.min(max_scroll);
    if scroll == max_scroll && app.ui.selected_message.is_none() {
        app.ui.follow_transcript();
    }
    app.ui.transcript_scroll = to_u16(scroll);

    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(view.lines).scroll((app.ui.transcript_scroll, 0)),
        inner,
    );
}

fn render_actions(f: &mut Frame, app: &mut App, area: Rect, split: bool) {
    let theme = &app.ui.theme;
    let mut title = vec![Span::styled(" Action Visualization ", theme.title_style)];
    if has_recent_activity(
        &app.session.actions,
        Local::now(),
        app.ui.recent_activity_window,
    ) {
        title.push(Span::styled(" ● LIVE ", theme.badge_style));
        title.push(Span::raw(" "));
    }

    let borders = if split {
        Borders::TOP | Borders::LEFT
    } else {
        Borders::TOP
    };
    let divider_style = if app.ui.panes.is_resizing() {
        theme.divider_active_style
    } else {
        pane_border_style(app, UiFocus::Actions)
    };
    let block = Block::default()
        .title(Line::from(title))
        .borders(borders)
        .border_style(divider_style);
    let inner = block.inner(area);
    let lines = build_action_lines(&app.session.actions, theme, inner.width);
    let max_scroll = to_u16(lines.len().saturating_sub(usize::from(inner.height)));
    app.ui.actions_scroll = app.ui.actions_scroll.min(max_scroll);

    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(lines).scroll((app.ui.actions_scroll, 0)),
        inner,
    );
}

fn render_input(f: &mut Frame, app: &mut App, area: Rect) {
    let title = if app.session.is_thinking {
        " Agent is thinking... "
    } else {
        " Message "
    };
    let block = Block::default()
        .title(title)
        .title_style(app.ui.theme.title_style)
        .borders(Borders::ALL)
        .border_style(pane_border_style(app, UiFocus::Input));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cursor_style = if app.ui.is_input_focused() {
        app.ui.theme.input_cursor_style
    } else {
        app.ui.theme.input_text_style
    };
    app.ui.apply_textarea_edit(|ta| ta.set_cursor_style(cursor_style));
    f.render_widget(app.ui.textarea(), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{ActionKind, ActionStatus, ChatMessage};
    use crate::utils::test_utils::{create_test_action, create_test_app};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| ui(f, app)).expect("draw");
        terminal
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn split_layout_records_divider() {
        let mut app = create_test_app();
        draw(&mut app, 100, 30);
        let regions = app.ui.regions;
        assert_eq!(regions.body, Rect::new(0, 1, 100, 26));
        assert_eq!(regions.divider_x, Some(50));
        assert_eq!(regions.transcript.width, 50);
        assert_eq!(regions.actions.x, 50);
    }

    #[test]
    fn full_chat_hides_action_pane() {
        let mut app = create_test_app();
        app.ui.panes.toggle_full_chat();
        let terminal = draw(&mut app, 100, 30);
        assert_eq!(app.ui.regions.divider_x, None);
        assert_eq!(app.ui.regions.actions.width, 0);
        assert!(!buffer_text(&terminal).contains("Action Visualization"));
    }

    #[test]
    fn transcript_follows_new_messages() {
        let mut app = create_test_app();
        for i in 0..30 {
            app.session
                .messages
                .push(ChatMessage::assistant(format!("m-{i}"), format!("reply {i}")));
        }
        let terminal = draw(&mut app, 100, 30);
        assert!(app.ui.transcript_scroll > 0);
        assert!(app.ui.auto_scroll);
        assert!(buffer_text(&terminal).contains("reply 29"));
    }

    #[test]
    fn recent_actions_show_live_badge() {
        let mut app = create_test_app();
        let terminal = draw(&mut app, 100, 30);
        assert!(buffer_text(&terminal).contains("No actions yet"));
        assert!(!buffer_text(&terminal).contains("LIVE"));

        app.session.actions.push(create_test_action(
            "a-1",
            ActionKind::CodeExecution,
            ActionStatus::Completed,
        ));
        let terminal = draw(&mut app, 100, 30);
        assert!(buffer_text(&terminal).contains("● LIVE"));
    }

    #[test]
    fn overlays_render_on_top() {
        let mut app = create_test_app();
        app.ui.toggle_dashboard();
        let terminal = draw(&mut app, 120, 40);
        let text = buffer_text(&terminal);
        assert!(text.contains("Dashboard"));
        assert!(text.contains("Recent Chats"));

        app.ui.close_dashboard();
        app.open_agent_picker();
        let terminal = draw(&mut app, 120, 40);
        assert!(buffer_text(&terminal).contains("Select Agent"));
    }
}
