use std::error::Error as StdError;
use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{SessionState, UiState};
use crate::core::agent_service::{AgentEvent, AgentRequest};
use crate::core::message::ChatMessage;
use crate::core::registry::{self, AgentDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAgentError {
    Unknown(String),
}

impl fmt::Display for SelectAgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectAgentError::Unknown(id) => {
                write!(f, "Unknown agent '{id}'. Run `agentdeck agents` to list them.")
            }
        }
    }
}

impl StdError for SelectAgentError {}

pub struct ConversationController<'a> {
    session: &'a mut SessionState,
    ui: &'a mut UiState,
}

impl<'a> ConversationController<'a> {
    pub fn new(session: &'a mut SessionState, ui: &'a mut UiState) -> Self {
        Self { session, ui }
    }

    /// Append the user's message and prepare a request for the agent.
    ///
    /// Blank input and input that arrives while a response is pending are
    /// ignored and leave the state untouched.
    pub fn submit(&mut self, text: String) -> Option<AgentRequest> {
        if text.trim().is_empty() || self.session.is_thinking {
            return None;
        }

        let message = ChatMessage::user(self.session.ids.next("msg"), text.clone());
        self.session.messages.push(message);
        self.session.is_thinking = true;
        self.session.current_response_id = self.session.current_response_id.wrapping_add(1);

        let cancel_token = CancellationToken::new();
        self.session.cancel_token = Some(cancel_token.clone());

        self.ui.follow_transcript();
        self.ui.selected_message = None;
        self.ui.pulse_start = std::time::Instant::now();

        info!(
            response_id = self.session.current_response_id,
            agent = self.session.selected_agent.id,
            chars = text.chars().count(),
            "message submitted"
        );

        Some(AgentRequest {
            prompt: text,
            agent: self.session.selected_agent,
            response_id: self.session.current_response_id,
            cancel_token,
        })
    }

    /// Fold one event of the current response into the session.
    pub fn apply_agent_event(&mut self, event: AgentEvent) {
        match event {
            AgentEvent::Message(message) => {
                self.session.messages.push(message);
                self.ui.follow_transcript();
            }
            AgentEvent::Action(action) => {
                debug!(kind = action.kind.as_str(), status = action.status.as_str(), "action logged");
                self.session.actions.push(action);
            }
            AgentEvent::Completed => {
                self.session.is_thinking = false;
                self.session.cancel_token = None;
                info!(
                    response_id = self.session.current_response_id,
                    messages = self.session.messages.len(),
                    actions = self.session.actions.len(),
                    "response completed"
                );
            }
        }
    }

    /// Cancel the in-flight response, if any. Events that still arrive for
    /// it are treated as stale.
    pub fn cancel_pending_response(&mut self) {
        if let Some(token) = self.session.cancel_token.take() {
            token.cancel();
            debug!(
                response_id = self.session.current_response_id,
                "pending response cancelled"
            );
        }
        if self.session.is_thinking {
            self.session.is_thinking = false;
            self.session.current_response_id = self.session.current_response_id.wrapping_add(1);
        }
    }

    pub fn select_agent(&mut self, id: &str) -> Result<&'static AgentDescriptor, SelectAgentError> {
        let agent = registry::find(id).ok_or_else(|| SelectAgentError::Unknown(id.to_string()))?;
        if agent.id != self.session.selected_agent.id {
            info!(from = self.session.selected_agent.id, to = agent.id, "agent selected");
        }
        self.session.selected_agent = agent;
        Ok(agent)
    }
}
