//! Transcript pane: chat bubbles, collapse previews and the thinking row.

use std::time::Duration;

use ratatui::text::{Line, Span};

use crate::core::app::App;
use crate::core::message::ChatMessage;
use crate::ui::markdown::{collapsed_preview, needs_collapse, render_content, RenderOptions};
use crate::ui::theme::Theme;
use crate::ui::wrap::{line_width, wrap_spans};

const GUTTER: &str = "│ ";
const SELECTED_GUTTER: &str = "▌ ";
const GUTTER_WIDTH: usize = 2;
const MIN_BUBBLE_WIDTH: usize = 20;

/// Lines for the transcript pane plus the first line index of every
/// message, used to bring a selected message into view.
#[derive(Debug, Default)]
pub struct TranscriptView {
    pub lines: Vec<Line<'static>>,
    pub message_starts: Vec<usize>,
}

impl TranscriptView {
    pub fn message_range(&self, index: usize) -> Option<(usize, usize)> {
        let start = *self.message_starts.get(index)?;
        let end = self
            .message_starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.lines.len());
        Some((start, end))
    }
}

pub fn build_transcript(app: &App, width: u16) -> TranscriptView {
    let width = usize::from(width).max(MIN_BUBBLE_WIDTH);
    let theme = &app.ui.theme;
    let options = RenderOptions {
        markdown: app.ui.markdown_enabled,
        syntax: app.ui.syntax_enabled,
    };

    let mut view = TranscriptView::default();
    for (index, message) in app.session.messages.iter().enumerate() {
        if index > 0 {
            view.lines.push(Line::default());
        }
        view.message_starts.push(view.lines.len());
        let bubble = MessageBubble {
            message,
            selected: app.ui.selected_message == Some(index),
            collapsible: needs_collapse(&message.content, app.ui.collapse_threshold),
            expanded: app.ui.is_expanded(&message.id),
        };
        view.lines.extend(bubble.render(theme, width, options));
    }

    if app.session.is_thinking {
        if !view.lines.is_empty() {
            view.lines.push(Line::default());
        }
        view.lines.push(thinking_line(theme, app.ui.activity_pulse()));
    }

    if view.lines.is_empty() {
        view.lines.push(Line::from(Span::styled(
            format!("Start a conversation with {}.", app.session.selected_agent.name),
            theme.placeholder_style,
        )));
    }
    view
}

struct MessageBubble<'a> {
    message: &'a ChatMessage,
    selected: bool,
    collapsible: bool,
    expanded: bool,
}

impl MessageBubble<'_> {
    fn render(&self, theme: &Theme, width: usize, options: RenderOptions) -> Vec<Line<'static>> {
        let is_user = self.message.is_user();
        let max_bubble = (width * 3 / 4).max(MIN_BUBBLE_WIDTH).min(width);
        let content_width = max_bubble.saturating_sub(GUTTER_WIDTH).max(1);
        let base = if is_user {
            theme.user_text_style
        } else {
            theme.assistant_text_style
        };

        let mut body = if self.collapsible && !self.expanded {
            let preview = collapsed_preview(&self.message.content);
            let mut lines: Vec<Line<'static>> = wrap_spans(&[Span::styled(preview, base)], content_width)
                .into_iter()
                .map(Line::from)
                .collect();
            lines.push(Line::from(Span::styled(
                "▸ collapsed (select and press Enter to expand)",
                theme.collapsed_hint_style,
            )));
            lines
        } else {
            let mut lines = render_content(&self.message.content, base, theme, content_width, options);
            if self.collapsible {
                lines.push(Line::from(Span::styled(
                    "▾ expanded (Enter to collapse)",
                    theme.collapsed_hint_style,
                )));
            }
            lines
        };

        let gutter_style = if self.selected {
            theme.selection_style
        } else if is_user {
            theme.user_label_style
        } else {
            theme.border_style
        };
        let gutter = if self.selected { SELECTED_GUTTER } else { GUTTER };

        let bubble_width = body
            .iter()
            .map(|line| line_width(&line.spans))
            .max()
            .unwrap_or(0)
            .max(MIN_BUBBLE_WIDTH.saturating_sub(GUTTER_WIDTH))
            + GUTTER_WIDTH;
        let offset = if is_user {
            width.saturating_sub(bubble_width)
        } else {
            0
        };

        let mut lines = Vec::with_capacity(body.len() + 1);
        lines.push(self.header(theme, width));
        for line in body.drain(..) {
            let mut spans = Vec::with_capacity(line.spans.len() + 2);
            if offset > 0 {
                spans.push(Span::raw(" ".repeat(offset)));
            }
            spans.push(Span::styled(gutter, gutter_style));
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
        lines
    }

    fn header(&self, theme: &Theme, width: usize) -> Line<'static> {
        let time = self.message.timestamp.format("%H:%M:%S").to_string();
        let (label, label_style) = if self.message.is_user() {
            ("You".to_string(), theme.user_label_style)
        } else {
            let author = self.message.author.as_deref().unwrap_or("Assistant");
            (author.to_string(), theme.assistant_label_style)
        };
        let label_style = if self.selected {
            label_style.patch(theme.selection_style)
        } else {
            label_style
        };

        if self.message.is_user() {
            let used = time.chars().count() + 2 + label.chars().count();
            Line::from(vec![
                Span::raw(" ".repeat(width.saturating_sub(used))),
                Span::styled(time, theme.timestamp_style),
                Span::raw("  "),
                Span::styled(label, label_style),
            ])
        } else {
            Line::from(vec![
                Span::styled(label, label_style),
                Span::raw("  "),
                Span::styled(time, theme.timestamp_style),
            ])
        }
    }
}

fn thinking_line(theme: &Theme, elapsed: Duration) -> Line<'static> {
    let frame = (elapsed.as_millis() / 300 % 3) as usize;
    let mut spans = Vec::with_capacity(5);
    for dot in 0..3 {
        let symbol = if dot == frame { "●" } else { "○" };
        spans.push(Span::styled(symbol, theme.thinking_style));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled("Agent is thinking...", theme.thinking_style));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::ChatMessage;
    use crate::utils::test_utils::{create_test_app, create_test_messages};

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn all_text(view: &TranscriptView) -> String {
        view.lines.iter().map(text).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn every_message_gets_a_start_index() {
        let mut app = create_test_app();
        app.session.messages = create_test_messages();
        let view = build_transcript(&app, 60);
        assert_eq!(view.message_starts.len(), 4);
        assert_eq!(view.message_starts[0], 0);
        assert!(view.message_starts.windows(2).all(|w| w[0] < w[1]));
        let (start, end) = view.message_range(3).expect("range");
        assert_eq!(end, view.lines.len());
        assert!(start < end);
    }

    #[test]
    fn user_messages_are_right_aligned() {
        let mut app = create_test_app();
        app.session.messages = vec![ChatMessage::user("u-1", "hi")];
        let view = build_transcript(&app, 60);
        let header = text(&view.lines[0]);
        assert!(header.ends_with("You"));
        assert_eq!(header.chars().count(), 60);
        assert!(text(&view.lines[1]).starts_with(' '));
    }

    #[test]
    fn unsigned_replies_use_generic_label() {
        let mut app = create_test_app();
        app.session.messages = vec![ChatMessage::assistant("a-1", "hello")];
        let view = build_transcript(&app, 60);
        assert!(text(&view.lines[0]).starts_with("Assistant"));
        assert_eq!(text(&view.lines[1]), "│ hello");
    }

    #[test]
    fn earlier_replies_keep_their_author_after_switching_agents() {
        let mut app = create_test_app();
        app.session.messages =
            vec![ChatMessage::assistant("a-1", "hello").with_author("DeepSeek Reasoner")];
        app.conversation()
            .select_agent("claude-3-opus-20240229")
            .expect("known");

        let view = build_transcript(&app, 60);
        let header = text(&view.lines[0]);
        assert!(header.starts_with("DeepSeek Reasoner"));
        assert!(!header.contains("Claude 3 Opus"));
    }

    #[test]
    fn thinking_indicator_follows_last_message() {
        let mut app = create_test_app();
        app.session.messages = vec![ChatMessage::user("u-1", "hi")];
        app.session.is_thinking = true;
        let view = build_transcript(&app, 60);
        let last = view.lines.last().map(text).unwrap_or_default();
        assert!(last.contains("Agent is thinking..."));

        app.session.is_thinking = false;
        let view = build_transcript(&app, 60);
        assert!(!all_text(&view).contains("Agent is thinking"));
    }

    #[test]
    fn long_messages_collapse_until_expanded() {
        let mut app = create_test_app();
        let long = "word ".repeat(300);
        app.session.messages = vec![ChatMessage::assistant("a-1", long.clone())];
        let collapsed = build_transcript(&app, 80);
        assert!(all_text(&collapsed).contains("▸ collapsed"));

        app.ui.toggle_expanded("a-1");
        let expanded = build_transcript(&app, 80);
        assert!(expanded.lines.len() > collapsed.lines.len());
        assert!(all_text(&expanded).contains("▾ expanded"));
    }

    #[test]
    fn empty_transcript_shows_placeholder() {
        let app = create_test_app();
        let view = build_transcript(&app, 60);
        assert_eq!(view.lines.len(), 1);
        assert!(text(&view.lines[0]).contains("Start a conversation"));
        assert!(view.message_starts.is_empty());
    }
}
