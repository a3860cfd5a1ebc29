mod input;
mod layout;
mod overlay;
mod responses;

use tokio::sync::mpsc;

use super::App;
use crate::core::agent_service::{AgentEvent, AgentRequest};

#[derive(Debug, Clone)]
pub enum AppAction {
    SubmitMessage,
    AgentEventReceived {
        event: AgentEvent,
        response_id: u64,
    },
    EditInput {
        input: tui_textarea::Input,
    },
    InsertIntoInput {
        text: String,
    },
    BeginResize,
    UpdateResize {
        column: u16,
    },
    EndResize,
    ToggleFullChat,
    ToggleFullVisualization,
    CycleFocus,
    ScrollFocused {
        lines: i32,
    },
    ScrollAt {
        column: u16,
        row: u16,
        lines: i32,
    },
    SelectPreviousMessage,
    SelectNextMessage,
    ToggleMessageExpanded,
    ToggleTheme,
    ToggleDashboard,
    CloseDashboard,
    DashboardNextField,
    DashboardPreviousField,
    DashboardInput {
        input: tui_textarea::Input,
    },
    DashboardTogglePreference,
    OpenAgentPicker,
    CloseAgentPicker,
    PickerMoveUp,
    PickerMoveDown,
    PickerApplySelection,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction, ctx: AppActionContext) {
        self.dispatch_many([action], ctx);
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

#[derive(Debug)]
pub enum AppCommand {
    SpawnResponse(AgentRequest),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    if ctx.term_width > 0 && ctx.term_height > 0 {
        app.ui.last_term_size = ratatui::layout::Size::new(ctx.term_width, ctx.term_height);
    }

    match action {
        AppAction::SubmitMessage
        | AppAction::AgentEventReceived { .. } => responses::handle_response_action(app, action),

        AppAction::EditInput { .. } | AppAction::InsertIntoInput { .. } | AppAction::Quit => {
            input::handle_input_action(app, action)
        }

        AppAction::BeginResize
        | AppAction::UpdateResize { .. }
        | AppAction::EndResize
        | AppAction::ToggleFullChat
        | AppAction::ToggleFullVisualization
        | AppAction::CycleFocus
        | AppAction::ScrollFocused { .. }
        | AppAction::ScrollAt { .. }
        | AppAction::SelectPreviousMessage
        | AppAction::SelectNextMessage
        | AppAction::ToggleMessageExpanded => layout::handle_layout_action(app, action),

        AppAction::ToggleTheme
        | AppAction::ToggleDashboard
        | AppAction::CloseDashboard
        | AppAction::DashboardNextField
        | AppAction::DashboardPreviousField
        | AppAction::DashboardInput { .. }
        | AppAction::DashboardTogglePreference
        | AppAction::OpenAgentPicker
        | AppAction::CloseAgentPicker
        | AppAction::PickerMoveUp
        | AppAction::PickerMoveDown
        | AppAction::PickerApplySelection => overlay::handle_overlay_action(app, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn apply_actions_collects_spawn_commands() {
        let mut app = create_test_app();
        app.ui.apply_textarea_edit(|ta| {
            ta.insert_str("hi");
        });
        let ctx = AppActionContext {
            term_width: 100,
            term_height: 30,
        };
        let commands = apply_actions(
            &mut app,
            [
                AppActionEnvelope {
                    action: AppAction::ToggleTheme,
                    context: ctx,
                },
                AppActionEnvelope {
                    action: AppAction::SubmitMessage,
                    context: ctx,
                },
            ],
        );
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], AppCommand::SpawnResponse(_)));
        assert!(!app.ui.dark_mode);
        assert_eq!(app.ui.last_term_size.width, 100);
    }

    #[tokio::test]
    async fn dispatcher_forwards_actions_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = AppActionDispatcher::new(tx);
        dispatcher.dispatch_many(
            [AppAction::ToggleFullChat, AppAction::EndResize],
            AppActionContext::default(),
        );
        let first = rx.recv().await.expect("first");
        let second = rx.recv().await.expect("second");
        assert!(matches!(first.action, AppAction::ToggleFullChat));
        assert!(matches!(second.action, AppAction::EndResize));
    }
}
