use tracing::debug;

use super::{App, AppAction, AppCommand};

pub(super) fn handle_response_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage => submit_input(app),
        AppAction::AgentEventReceived { event, response_id } => {
            if !app.is_current_response(response_id) {
                debug!(response_id, "dropping stale agent event");
                return None;
            }
            app.conversation().apply_agent_event(event);
            None
        }
        _ => unreachable!("non-response action routed to response handler"),
    }
}

fn submit_input(app: &mut App) -> Option<AppCommand> {
    let text = app.ui.get_input_text();
    let request = app.conversation().submit(text)?;
    app.ui.clear_input();
    Some(AppCommand::SpawnResponse(request))
}
