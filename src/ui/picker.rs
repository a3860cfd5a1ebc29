//! Agent picker popup.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::app::{AgentPickerState, PickerRow};
use crate::ui::theme::Theme;

const PICKER_WIDTH: u16 = 56;

pub fn picker_lines(picker: &AgentPickerState, current_id: &str, theme: &Theme) -> Vec<Line<'static>> {
    picker
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| match row {
            PickerRow::Header(provider) => Line::from(Span::styled(
                provider.display_name().to_string(),
                theme.heading_style,
            )),
            PickerRow::Agent(agent) => {
                let selected = index == picker.selected_index();
                let marker = if selected { "› " } else { "  " };
                let current = if agent.id == current_id { " ✓" } else { "" };
                let name_style = if selected {
                    theme.overlay_style.patch(theme.selection_style)
                } else {
                    theme.overlay_style
                };
                let mut spans = vec![
                    Span::styled(marker, theme.focused_field_style),
                    Span::styled(format!("{}{}", agent.name, current), name_style),
                ];
                if agent.is_max {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(" MAX ", theme.max_badge_style));
                }
                spans.push(Span::styled(
                    format!("  {}", agent.description),
                    theme.timestamp_style,
                ));
                Line::from(spans)
            }
        })
        .collect()
}

pub fn render_agent_picker(frame: &mut Frame, picker: &AgentPickerState, current_id: &str, theme: &Theme) {
    let lines = picker_lines(picker, current_id, theme);
    let height = (lines.len() as u16).saturating_add(2);
    let area = popup_area(frame.area(), PICKER_WIDTH, height);

    // Keep the cursor row visible on short terminals
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = picker.selected_index().saturating_sub(visible.saturating_sub(1));

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Select Agent ")
        .title_style(theme.title_style)
        .title_bottom(Line::from(" ↑/↓ move • Enter select • Esc close ").style(theme.timestamp_style))
        .borders(Borders::ALL)
        .border_style(theme.divider_active_style)
        .style(theme.overlay_style);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn rows_include_headers_and_badges() {
        let picker = AgentPickerState::new("gpt-4o");
        let lines = picker_lines(&picker, "gpt-4o", &Theme::dark_default());
        assert_eq!(lines.len(), picker.rows().len());
        assert_eq!(text(&lines[0]), "OpenAI");
        let first_agent = text(&lines[1]);
        assert!(first_agent.starts_with("› GPT-4o ✓"));
        assert!(first_agent.contains(" MAX "));
        assert!(!text(&lines[2]).contains(" MAX "));
    }

    #[test]
    fn every_registry_agent_is_listed() {
        let picker = AgentPickerState::new(registry::DEFAULT_AGENT_ID);
        let lines = picker_lines(&picker, registry::DEFAULT_AGENT_ID, &Theme::light());
        let joined: String = lines.iter().map(text).collect::<Vec<_>>().join("\n");
        for agent in registry::all() {
            assert!(joined.contains(agent.name), "missing {}", agent.name);
        }
    }

    #[test]
    fn popup_is_centered_and_bounded() {
        let area = popup_area(Rect::new(0, 0, 100, 40), PICKER_WIDTH, 20);
        assert_eq!(area, Rect::new(22, 10, 56, 20));
        let small = popup_area(Rect::new(0, 0, 30, 10), PICKER_WIDTH, 20);
        assert_eq!((small.width, small.height), (30, 10));
    }
}
