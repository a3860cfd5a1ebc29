use tracing::warn;

use super::{App, AppAction, AppCommand};

pub(super) fn handle_overlay_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::ToggleTheme => app.ui.toggle_theme(),
        AppAction::ToggleDashboard => app.ui.toggle_dashboard(),
        AppAction::CloseDashboard => app.ui.close_dashboard(),
        AppAction::DashboardNextField => app.ui.dashboard.focus_next(),
        AppAction::DashboardPreviousField => app.ui.dashboard.focus_previous(),
        AppAction::DashboardInput { input } => {
            app.ui.dashboard.input(input);
        }
        AppAction::DashboardTogglePreference => {
            app.ui.dashboard.toggle_focused_preference();
        }
        AppAction::OpenAgentPicker => app.open_agent_picker(),
        AppAction::CloseAgentPicker => app.close_agent_picker(),
        AppAction::PickerMoveUp => {
            if let Some(picker) = app.ui.picker.as_mut() {
                picker.move_up();
            }
        }
        AppAction::PickerMoveDown => {
            if let Some(picker) = app.ui.picker.as_mut() {
                picker.move_down();
            }
        }
        AppAction::PickerApplySelection => apply_picker_selection(app),
        _ => unreachable!("non-overlay action routed to overlay handler"),
    }
    None
}

fn apply_picker_selection(app: &mut App) {
    let Some(agent) = app.ui.picker.take().and_then(|p| p.selected_agent()) else {
        return;
    };
    if let Err(err) = app.conversation().select_agent(agent.id) {
        warn!(%err, "picker offered an agent the registry rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{apply_action, AppActionContext, DashboardField};
    use crate::utils::test_utils::create_test_app;

    fn run(app: &mut App, action: AppAction) {
        apply_action(app, action, AppActionContext::default());
    }

    #[test]
    fn picker_apply_switches_agent_and_closes() {
        let mut app = create_test_app();
        run(&mut app, AppAction::OpenAgentPicker);
        run(&mut app, AppAction::PickerMoveDown);
        run(&mut app, AppAction::PickerApplySelection);
        assert!(!app.is_picker_open());
        assert_eq!(app.selected_agent().id, "gpt-4-turbo");
    }

    #[test]
    fn picker_close_keeps_agent() {
        let mut app = create_test_app();
        run(&mut app, AppAction::OpenAgentPicker);
        run(&mut app, AppAction::PickerMoveUp);
        run(&mut app, AppAction::CloseAgentPicker);
        assert_eq!(app.selected_agent().id, "gpt-4o");
    }

    #[test]
    fn dashboard_preferences_toggle_via_actions() {
        let mut app = create_test_app();
        run(&mut app, AppAction::ToggleDashboard);
        assert!(app.ui.dashboard_open);
        run(&mut app, AppAction::DashboardPreviousField);
        assert_eq!(app.ui.dashboard.focused, DashboardField::SaveChatHistory);
        run(&mut app, AppAction::DashboardTogglePreference);
        assert!(!app.ui.dashboard.save_chat_history);
        run(&mut app, AppAction::CloseDashboard);
        assert!(!app.ui.dashboard_open);
    }

    #[test]
    fn theme_and_dashboard_do_not_touch_conversation() {
        let mut app = create_test_app();
        run(&mut app, AppAction::ToggleTheme);
        run(&mut app, AppAction::ToggleDashboard);
        assert!(app.session.messages.is_empty());
        assert!(!app.session.is_thinking);
    }
}
