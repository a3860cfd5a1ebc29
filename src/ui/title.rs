use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::app::{App, UiFocus};
use crate::core::panes::PaneMode;
use crate::utils::text::fit_to_width;

const SEPARATOR: &str = " • ";

const KEY_HINT_VARIANTS: [&str; 3] = [
    "^P agent • ^T theme • ^G dashboard • F5/F6 full • Tab focus • ^C quit",
    "^P agent • ^T theme • ^G dash • ^C quit",
    "^C quit",
];

fn focus_label(focus: UiFocus) -> &'static str {
    match focus {
        UiFocus::Input => "input",
        UiFocus::Transcript => "chat",
        UiFocus::Actions => "actions",
    }
}

fn mode_label(mode: PaneMode) -> Option<&'static str> {
    match mode {
        PaneMode::Split => None,
        PaneMode::ChatFull => Some("full chat"),
        PaneMode::VisualizationFull => Some("full actions"),
    }
}

/// Header bar: product name, agent (with MAX badge), theme and layout
/// indicators, then as many key hints as fit.
pub fn build_main_title(app: &App, available_width: u16) -> Line<'static> {
    let available = usize::from(available_width);
    let theme = &app.ui.theme;
    let agent = app.selected_agent();

    let mut spans = vec![
        Span::styled(format!("AgentDeck v{}", env!("CARGO_PKG_VERSION")), theme.title_style),
        Span::styled(SEPARATOR, theme.timestamp_style),
        Span::styled(agent.name.to_string(), theme.title_style),
    ];
    if agent.is_max {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(" MAX ", theme.max_badge_style));
    }

    let mut indicators = vec![
        if app.ui.dark_mode { "☾ dark" } else { "☀ light" },
        focus_label(app.ui.focus),
    ];
    if let Some(mode) = mode_label(app.ui.panes.mode()) {
        indicators.push(mode);
    }
    if app.ui.dashboard_open {
        indicators.push("dashboard");
    }
    for indicator in indicators {
        spans.push(Span::styled(SEPARATOR, theme.timestamp_style));
        spans.push(Span::styled(indicator, theme.timestamp_style));
    }

    let used: usize = spans
        .iter()
        .map(|span| UnicodeWidthStr::width(span.content.as_ref()))
        .sum();
    let separator_width = UnicodeWidthStr::width(SEPARATOR);
    if let Some(hint) = KEY_HINT_VARIANTS
        .iter()
        .find(|hint| used + separator_width + UnicodeWidthStr::width(**hint) <= available)
    {
        spans.push(Span::styled(SEPARATOR, theme.timestamp_style));
        spans.push(Span::styled(*hint, theme.placeholder_style));
        return Line::from(spans);
    }

    if used <= available {
        return Line::from(spans);
    }
    // Too narrow for the indicators: keep only the name and agent
    let plain = format!("AgentDeck{SEPARATOR}{}", agent.name);
    Line::from(Span::styled(fit_to_width(&plain, available), theme.title_style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry;
    use crate::utils::test_utils::create_test_app;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wide_title_shows_agent_badge_and_hints() {
        let app = create_test_app();
        let title = text(&build_main_title(&app, 200));
        assert!(title.starts_with("AgentDeck v"));
        assert!(title.contains("GPT-4o  MAX "));
        assert!(title.contains("☾ dark"));
        assert!(title.ends_with(KEY_HINT_VARIANTS[0]));
    }

    #[test]
    fn hints_shrink_with_width() {
        let app = create_test_app();
        let title = text(&build_main_title(&app, 80));
        assert!(UnicodeWidthStr::width(title.as_str()) <= 80);
        assert!(!title.contains("F5/F6"));
    }

    #[test]
    fn indicators_follow_state() {
        let mut app = create_test_app();
        app.ui.toggle_theme();
        app.ui.toggle_dashboard();
        app.ui.panes.toggle_full_chat();
        app.session.selected_agent = registry::find("gpt-4-turbo").expect("agent");
        let title = text(&build_main_title(&app, 200));
        assert!(title.contains("☀ light"));
        assert!(title.contains("full chat"));
        assert!(title.contains("dashboard"));
        assert!(!title.contains(" MAX "));
    }

    #[test]
    fn very_narrow_title_is_clipped() {
        let app = create_test_app();
        let title = text(&build_main_title(&app, 12));
        assert!(UnicodeWidthStr::width(title.as_str()) <= 12);
    }
}
