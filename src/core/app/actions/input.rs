use super::{App, AppAction, AppCommand};
use crate::core::app::UiFocus;

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::EditInput { input } => {
            app.ui.focus = UiFocus::Input;
            app.ui.apply_textarea_edit(|ta| {
                ta.input(input);
            });
            None
        }
        AppAction::InsertIntoInput { text } => {
            let sanitized = sanitize_pasted_text(&text);
            app.ui.focus = UiFocus::Input;
            app.ui.apply_textarea_edit(|ta| {
                ta.insert_str(&sanitized);
            });
            None
        }
        AppAction::Quit => {
            app.request_exit();
            None
        }
        _ => unreachable!("non-input action routed to input handler"),
    }
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\t', "    ")
        .replace('\r', "\n")
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}
