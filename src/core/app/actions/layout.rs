use ratatui::layout::{Position, Rect};

use super::{App, AppAction, AppCommand};
use crate::core::app::UiFocus;
use crate::core::panes::ContainerBounds;
use crate::ui::markdown::needs_collapse;

pub(super) fn handle_layout_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::BeginResize => app.ui.panes.begin_resize(),
        AppAction::UpdateResize { column } => {
            let body = app.ui.regions.body;
            let bounds = ContainerBounds::new(f64::from(body.x), f64::from(body.width));
            app.ui.panes.update_resize(f64::from(column), bounds);
        }
        AppAction::EndResize => app.ui.panes.end_resize(),
        AppAction::ToggleFullChat => app.ui.panes.toggle_full_chat(),
        AppAction::ToggleFullVisualization => app.ui.panes.toggle_full_visualization(),
        AppAction::CycleFocus => app.ui.cycle_focus(),
        AppAction::ScrollFocused { lines } => match app.ui.focus {
            UiFocus::Actions => app.ui.scroll_actions(lines),
            UiFocus::Input | UiFocus::Transcript => app.ui.scroll_transcript(lines),
        },
        AppAction::ScrollAt { column, row, lines } => {
            let position = Position::new(column, row);
            if contains(app.ui.regions.actions, position) {
                app.ui.scroll_actions(lines);
            } else if contains(app.ui.regions.transcript, position) {
                app.ui.scroll_transcript(lines);
            }
        }
        AppAction::SelectPreviousMessage => {
            let count = app.session.messages.len();
            app.ui.select_previous_message(count);
        }
        AppAction::SelectNextMessage => {
            let count = app.session.messages.len();
            app.ui.select_next_message(count);
        }
        AppAction::ToggleMessageExpanded => toggle_selected_message(app),
        _ => unreachable!("non-layout action routed to layout handler"),
    }
    None
}

fn contains(rect: Rect, position: Position) -> bool {
    rect.width > 0 && rect.height > 0 && rect.contains(position)
}

fn toggle_selected_message(app: &mut App) {
    let Some(index) = app.ui.selected_message else {
        return;
    };
    let Some(message) = app.session.messages.get(index) else {
        return;
    };
    if !needs_collapse(&message.content, app.ui.collapse_threshold) {
        return;
    }
    let id = message.id.clone();
    app.ui.toggle_expanded(&id);
    app.ui.scroll_selection_into_view = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{apply_action, AppActionContext, FrameRegions};
    use crate::core::message::ChatMessage;
    use crate::core::panes::{PaneMode, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO};
    use crate::utils::test_utils::create_test_app;

    fn run(app: &mut App, action: AppAction) {
        apply_action(app, action, AppActionContext::default());
    }

    fn with_regions(app: &mut App) {
        app.ui.regions = FrameRegions {
            body: Rect::new(0, 1, 100, 20),
            transcript: Rect::new(0, 1, 50, 20),
            actions: Rect::new(51, 1, 49, 20),
            divider_x: Some(50),
        };
    }

    #[test]
    fn drag_sequence_updates_ratio_from_columns() {
        let mut app = create_test_app();
        with_regions(&mut app);
        run(&mut app, AppAction::BeginResize);
        run(&mut app, AppAction::UpdateResize { column: 30 });
        assert_eq!(app.ui.panes.split_ratio(), 30.0);
        run(&mut app, AppAction::UpdateResize { column: 99 });
        assert_eq!(app.ui.panes.split_ratio(), MAX_SPLIT_RATIO);
        run(&mut app, AppAction::UpdateResize { column: 2 });
        assert_eq!(app.ui.panes.split_ratio(), MIN_SPLIT_RATIO);
        run(&mut app, AppAction::EndResize);
        run(&mut app, AppAction::UpdateResize { column: 60 });
        assert_eq!(app.ui.panes.split_ratio(), MIN_SPLIT_RATIO);
    }

    #[test]
    fn update_before_first_frame_is_ignored() {
        let mut app = create_test_app();
        run(&mut app, AppAction::BeginResize);
        run(&mut app, AppAction::UpdateResize { column: 10 });
        assert_eq!(app.ui.panes.split_ratio(), 50.0);
    }

    #[test]
    fn full_mode_toggles_are_exclusive() {
        let mut app = create_test_app();
        run(&mut app, AppAction::ToggleFullChat);
        run(&mut app, AppAction::ToggleFullVisualization);
        assert_eq!(app.ui.panes.mode(), PaneMode::VisualizationFull);
        run(&mut app, AppAction::ToggleFullVisualization);
        assert_eq!(app.ui.panes.mode(), PaneMode::Split);
    }

    #[test]
    fn wheel_scrolls_pane_under_pointer() {
        let mut app = create_test_app();
        with_regions(&mut app);
        run(
            &mut app,
            AppAction::ScrollAt {
                column: 70,
                row: 5,
                lines: 3,
            },
        );
        assert_eq!(app.ui.actions_scroll, 3);
        assert_eq!(app.ui.transcript_scroll, 0);

        app.ui.transcript_scroll = 5;
        run(
            &mut app,
            AppAction::ScrollAt {
                column: 10,
                row: 5,
                lines: -2,
            },
        );
        assert_eq!(app.ui.transcript_scroll, 3);
        assert!(!app.ui.auto_scroll);
    }

    #[test]
    fn only_collapsible_messages_expand() {
        let mut app = create_test_app();
        app.session
            .messages
            .push(ChatMessage::user("short", "just a line"));
        app.session
            .messages
            .push(ChatMessage::assistant("long", "x".repeat(1500)));

        app.ui.selected_message = Some(0);
        run(&mut app, AppAction::ToggleMessageExpanded);
        assert!(!app.ui.is_expanded("short"));

        run(&mut app, AppAction::SelectNextMessage);
        run(&mut app, AppAction::ToggleMessageExpanded);
        assert!(app.ui.is_expanded("long"));
        run(&mut app, AppAction::ToggleMessageExpanded);
        assert!(!app.ui.is_expanded("long"));
    }

    #[test]
    fn focused_scroll_targets_action_pane() {
        let mut app = create_test_app();
        run(&mut app, AppAction::CycleFocus);
        run(&mut app, AppAction::CycleFocus);
        assert_eq!(app.ui.focus, UiFocus::Actions);
        run(&mut app, AppAction::ScrollFocused { lines: 4 });
        assert_eq!(app.ui.actions_scroll, 4);
    }
}
