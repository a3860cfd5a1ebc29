use ratatui::style::{Color, Modifier, Style};

use crate::core::message::ActionStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub dark: bool,
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Transcript
    pub user_label_style: Style,
    pub user_text_style: Style,
    pub assistant_label_style: Style,
    pub assistant_text_style: Style,
    pub timestamp_style: Style,
    pub thinking_style: Style,
    pub selection_style: Style,
    pub collapsed_hint_style: Style,

    // Markdown
    pub heading_style: Style,
    pub link_style: Style,
    pub link_url_style: Style,
    pub inline_code_style: Style,
    pub codeblock_style: Style,
    pub quote_style: Style,
    pub table_border_style: Style,
    pub table_header_style: Style,

    // Actions
    pub action_title_style: Style,
    pub action_result_style: Style,
    pub action_step_style: Style,
    pub placeholder_style: Style,
    pub badge_style: Style,

    // Chrome
    pub title_style: Style,
    pub border_style: Style,
    pub divider_active_style: Style,
    pub max_badge_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub overlay_style: Style,
    pub focused_field_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            dark: true,
            background_color: Color::Rgb(0x11, 0x18, 0x27),

            user_label_style: Style::default()
                .fg(Color::Rgb(0x60, 0xa5, 0xfa))
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Rgb(0xdb, 0xea, 0xfe)),
            assistant_label_style: Style::default()
                .fg(Color::Rgb(0xe5, 0xe7, 0xeb))
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Rgb(0xe5, 0xe7, 0xeb)),
            timestamp_style: Style::default().fg(Color::Rgb(0x9c, 0xa3, 0xaf)),
            thinking_style: Style::default().fg(Color::Rgb(0x60, 0xa5, 0xfa)),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),
            collapsed_hint_style: Style::default()
                .fg(Color::Rgb(0x9c, 0xa3, 0xaf))
                .add_modifier(Modifier::ITALIC),

            heading_style: Style::default()
                .fg(Color::Rgb(0x93, 0xc5, 0xfd))
                .add_modifier(Modifier::BOLD),
            link_style: Style::default()
                .fg(Color::Rgb(0x60, 0xa5, 0xfa))
                .add_modifier(Modifier::UNDERLINED),
            link_url_style: Style::default().fg(Color::Rgb(0x6b, 0x72, 0x80)),
            inline_code_style: Style::default()
                .fg(Color::Rgb(0xfb, 0xbf, 0x24))
                .bg(Color::Rgb(0x1f, 0x29, 0x37)),
            codeblock_style: Style::default()
                .fg(Color::Rgb(0xd1, 0xd5, 0xdb))
                .bg(Color::Rgb(0x1e, 0x1e, 0x1e)),
            quote_style: Style::default()
                .fg(Color::Rgb(0x9c, 0xa3, 0xaf))
                .add_modifier(Modifier::ITALIC),
            table_border_style: Style::default().fg(Color::Rgb(0x4b, 0x55, 0x63)),
            table_header_style: Style::default().add_modifier(Modifier::BOLD),

            action_title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            action_result_style: Style::default()
                .fg(Color::Rgb(0xd1, 0xd5, 0xdb))
                .bg(Color::Rgb(0x37, 0x41, 0x51)),
            action_step_style: Style::default().fg(Color::Rgb(0xd1, 0xd5, 0xdb)),
            placeholder_style: Style::default()
                .fg(Color::Rgb(0x6b, 0x72, 0x80))
                .add_modifier(Modifier::ITALIC),
            badge_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(0x34, 0xd3, 0x99))
                .add_modifier(Modifier::BOLD),

            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::Rgb(0x37, 0x41, 0x51)),
            divider_active_style: Style::default().fg(Color::Rgb(0x3b, 0x82, 0xf6)),
            max_badge_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x3b, 0x82, 0xf6))
                .add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            overlay_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x1f, 0x29, 0x37)),
            focused_field_style: Style::default().fg(Color::Rgb(0x60, 0xa5, 0xfa)),
        }
    }

    pub fn light() -> Self {
        Theme {
            dark: false,
            background_color: Color::Rgb(0xf9, 0xfa, 0xfb),

            user_label_style: Style::default()
                .fg(Color::Rgb(0x25, 0x63, 0xeb))
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Rgb(0x1e, 0x3a, 0x8a)),
            assistant_label_style: Style::default()
                .fg(Color::Rgb(0x11, 0x18, 0x27))
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Rgb(0x11, 0x18, 0x27)),
            timestamp_style: Style::default().fg(Color::Rgb(0x6b, 0x72, 0x80)),
            thinking_style: Style::default().fg(Color::Rgb(0x25, 0x63, 0xeb)),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),
            collapsed_hint_style: Style::default()
                .fg(Color::Rgb(0x6b, 0x72, 0x80))
                .add_modifier(Modifier::ITALIC),

            heading_style: Style::default()
                .fg(Color::Rgb(0x1d, 0x4e, 0xd8))
                .add_modifier(Modifier::BOLD),
            link_style: Style::default()
                .fg(Color::Rgb(0x25, 0x63, 0xeb))
                .add_modifier(Modifier::UNDERLINED),
            link_url_style: Style::default().fg(Color::Rgb(0x9c, 0xa3, 0xaf)),
            inline_code_style: Style::default()
                .fg(Color::Rgb(0xb4, 0x53, 0x09))
                .bg(Color::Rgb(0xf3, 0xf4, 0xf6)),
            codeblock_style: Style::default()
                .fg(Color::Rgb(0x1f, 0x29, 0x37))
                .bg(Color::Rgb(0xf3, 0xf4, 0xf6)),
            quote_style: Style::default()
                .fg(Color::Rgb(0x4b, 0x55, 0x63))
                .add_modifier(Modifier::ITALIC),
            table_border_style: Style::default().fg(Color::Rgb(0xd1, 0xd5, 0xdb)),
            table_header_style: Style::default().add_modifier(Modifier::BOLD),

            action_title_style: Style::default()
                .fg(Color::Rgb(0x11, 0x18, 0x27))
                .add_modifier(Modifier::BOLD),
            action_result_style: Style::default()
                .fg(Color::Rgb(0x1f, 0x29, 0x37))
                .bg(Color::Rgb(0xf3, 0xf4, 0xf6)),
            action_step_style: Style::default().fg(Color::Rgb(0x37, 0x41, 0x51)),
            placeholder_style: Style::default()
                .fg(Color::Rgb(0x9c, 0xa3, 0xaf))
                .add_modifier(Modifier::ITALIC),
            badge_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x05, 0x96, 0x69))
                .add_modifier(Modifier::BOLD),

            title_style: Style::default()
                .fg(Color::Rgb(0x11, 0x18, 0x27))
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::Rgb(0xd1, 0xd5, 0xdb)),
            divider_active_style: Style::default().fg(Color::Rgb(0x25, 0x63, 0xeb)),
            max_badge_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x3b, 0x82, 0xf6))
                .add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(Color::Rgb(0x11, 0x18, 0x27)),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            overlay_style: Style::default()
                .fg(Color::Rgb(0x11, 0x18, 0x27))
                .bg(Color::White),
            focused_field_style: Style::default().fg(Color::Rgb(0x25, 0x63, 0xeb)),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark_default()
        } else {
            Self::light()
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    pub fn action_status_style(&self, status: ActionStatus) -> Style {
        let color = match (status, self.dark) {
            (ActionStatus::Pending, true) => Color::Rgb(0xfb, 0xbf, 0x24),
            (ActionStatus::Pending, false) => Color::Rgb(0xb4, 0x53, 0x09),
            (ActionStatus::Completed, true) => Color::Rgb(0x34, 0xd3, 0x99),
            (ActionStatus::Completed, false) => Color::Rgb(0x05, 0x96, 0x69),
            (ActionStatus::Error, true) => Color::Rgb(0xf8, 0x71, 0x71),
            (ActionStatus::Error, false) => Color::Rgb(0xdc, 0x26, 0x26),
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_palette() {
        assert!(Theme::for_mode(true).dark);
        assert!(!Theme::for_mode(false).dark);
        assert_eq!(Theme::from_name("LIGHT"), Theme::light());
        assert_eq!(Theme::from_name("solarized"), Theme::dark_default());
    }

    #[test]
    fn error_status_is_distinct() {
        let theme = Theme::dark_default();
        assert_ne!(
            theme.action_status_style(ActionStatus::Error),
            theme.action_status_style(ActionStatus::Completed)
        );
    }
}
