//! Settings drawer state: masked key fields, recent chat stubs and two
//! preference switches. Nothing here leaves the drawer.

use chrono::{Local, NaiveDate};
use tui_textarea::{Input, TextArea};

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardField {
    OpenAiKey,
    AnthropicKey,
    AutoSelectModel,
    SaveChatHistory,
}

impl DashboardField {
    pub const ALL: [DashboardField; 4] = [
        DashboardField::OpenAiKey,
        DashboardField::AnthropicKey,
        DashboardField::AutoSelectModel,
        DashboardField::SaveChatHistory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardField::OpenAiKey => "OpenAI API Key",
            DashboardField::AnthropicKey => "Anthropic API Key",
            DashboardField::AutoSelectModel => "Auto-select AI Model",
            DashboardField::SaveChatHistory => "Save Chat History",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            DashboardField::OpenAiKey | DashboardField::AnthropicKey
        )
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChat {
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub focused: DashboardField,
    openai_key: TextArea<'static>,
    anthropic_key: TextArea<'static>,
    pub auto_select_model: bool,
    pub save_chat_history: bool,
    pub recent_chats: Vec<RecentChat>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

fn key_field(placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_mask_char(MASK_CHAR);
    textarea.set_placeholder_text(placeholder.to_string());
    textarea
}

impl DashboardState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focused: DashboardField::OpenAiKey,
            openai_key: key_field("sk-..."),
            anthropic_key: key_field("sk-ant-..."),
            auto_select_model: false,
            save_chat_history: true,
            recent_chats: (1..=3)
                .map(|n| RecentChat {
                    title: format!("Chat Session #{n}"),
                    date: today,
                })
                .collect(),
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focused.position() + 1) % DashboardField::ALL.len();
        self.focused = DashboardField::ALL[next];
    }

    pub fn focus_previous(&mut self) {
        let len = DashboardField::ALL.len();
        let prev = (self.focused.position() + len - 1) % len;
        self.focused = DashboardField::ALL[prev];
    }

    /// Feed a key into the focused text field. Returns false when the focus
    /// is on a preference switch.
    pub fn input(&mut self, input: Input) -> bool {
        match self.focused {
            DashboardField::OpenAiKey => {
                self.openai_key.input(input);
                true
            }
            DashboardField::AnthropicKey => {
                self.anthropic_key.input(input);
                true
            }
            _ => false,
        }
    }

    /// Flip the focused preference. Text fields are left alone.
    pub fn toggle_focused_preference(&mut self) -> bool {
        match self.focused {
            DashboardField::AutoSelectModel => {
                self.auto_select_model = !self.auto_select_model;
                true
            }
            DashboardField::SaveChatHistory => {
                self.save_chat_history = !self.save_chat_history;
                true
            }
            _ => false,
        }
    }

    pub fn preference(&self, field: DashboardField) -> Option<bool> {
        match field {
            DashboardField::AutoSelectModel => Some(self.auto_select_model),
            DashboardField::SaveChatHistory => Some(self.save_chat_history),
            _ => None,
        }
    }

    pub fn key_field(&self, field: DashboardField) -> Option<&TextArea<'static>> {
        match field {
            DashboardField::OpenAiKey => Some(&self.openai_key),
            DashboardField::AnthropicKey => Some(&self.anthropic_key),
            _ => None,
        }
    }

    pub fn key_len(&self, field: DashboardField) -> usize {
        self.key_field(field)
            .map(|ta| ta.lines().iter().map(|l| l.chars().count()).sum())
            .unwrap_or(0)
    }
}
