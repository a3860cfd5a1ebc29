use crate::core::app::{App, SessionOverrides};
use crate::core::config::Config;
use crate::core::message::{ActionKind, ActionStatus, AgentAction, ChatMessage};

pub fn create_test_app() -> App {
    App::new(Config::default(), SessionOverrides::default())
}

pub fn create_test_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("msg-1", "Hello"),
        ChatMessage::assistant("msg-2", "Hi there!"),
        ChatMessage::user("msg-3", "How are you?"),
        ChatMessage::assistant("msg-4", "I'm doing well, thank you for asking!"),
    ]
}

pub fn create_test_action(id: &str, kind: ActionKind, status: ActionStatus) -> AgentAction {
    AgentAction::new(id, kind, format!("{} action", kind.as_str()), status)
}
