use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::message::{AgentAction, ChatMessage, IdGenerator};
use crate::core::registry::AgentDescriptor;

pub mod actions;
pub mod conversation;
pub mod dashboard;
pub mod picker;
pub mod ui_state;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use conversation::{ConversationController, SelectAgentError};
pub use dashboard::{DashboardField, DashboardState};
pub use picker::{AgentPickerState, PickerRow};
pub use ui_state::{FrameRegions, UiFocus, UiState};

/// Conversation data: the transcript, the action log and the bookkeeping
/// for the single in-flight response.
#[derive(Debug)]
pub struct SessionState {
    pub messages: Vec<ChatMessage>,
    pub actions: Vec<AgentAction>,
    pub is_thinking: bool,
    pub selected_agent: &'static AgentDescriptor,
    pub ids: IdGenerator,
    pub current_response_id: u64,
    pub cancel_token: Option<CancellationToken>,
}

impl SessionState {
    pub fn new(selected_agent: &'static AgentDescriptor) -> Self {
        Self {
            messages: Vec::new(),
            actions: Vec::new(),
            is_thinking: false,
            selected_agent,
            ids: IdGenerator::new(),
            current_response_id: 0,
            cancel_token: None,
        }
    }
}

/// Per-run values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub agent: Option<&'static AgentDescriptor>,
    pub light_mode: bool,
}

#[derive(Debug)]
pub struct App {
    pub session: SessionState,
    pub ui: UiState,
    pub config: Config,
}

impl App {
    pub fn new(config: Config, overrides: SessionOverrides) -> Self {
        let agent = overrides.agent.unwrap_or_else(|| config.default_agent());
        let dark_mode = config.dark_mode() && !overrides.light_mode;
        let ui = UiState::from_config(&config, dark_mode);
        Self {
            session: SessionState::new(agent),
            ui,
            config,
        }
    }

    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.session, &mut self.ui)
    }

    pub fn is_current_response(&self, response_id: u64) -> bool {
        self.session.current_response_id == response_id
    }

    pub fn selected_agent(&self) -> &'static AgentDescriptor {
        self.session.selected_agent
    }

    /// Cancel whatever is in flight and ask the event loop to stop.
    pub fn request_exit(&mut self) {
        self.conversation().cancel_pending_response();
        self.ui.exit_requested = true;
    }

    pub fn open_agent_picker(&mut self) {
        self.ui.picker = Some(AgentPickerState::new(self.session.selected_agent.id));
    }

    pub fn close_agent_picker(&mut self) {
        self.ui.picker = None;
    }

    pub fn is_picker_open(&self) -> bool {
        self.ui.picker.is_some()
    }
}
