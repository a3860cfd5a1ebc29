use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

/// One turn of the transcript. Records are never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: Role,
    /// Display name of the agent that wrote an assistant turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            author: None,
            timestamp: Local::now(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, Role::User, content)
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, Role::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_assistant(&self) -> bool {
        self.role.is_assistant()
    }
}

/// What an agent action claims to have done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    WebNavigation,
    CodeExecution,
    FileOperation,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::WebNavigation => "web-navigation",
            ActionKind::CodeExecution => "code-execution",
            ActionKind::FileOperation => "file-operation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    Pending,
    Completed,
    Error,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::Completed => "completed",
            ActionStatus::Error => "error",
        }
    }
}

/// Sub-step of a logged action, e.g. a click performed during a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Navigate,
    Click,
    Type,
    Scroll,
    Extract,
    Screenshot,
    Run,
    Read,
    Write,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Navigate => "navigate",
            StepKind::Click => "click",
            StepKind::Type => "type",
            StepKind::Scroll => "scroll",
            StepKind::Extract => "extract",
            StepKind::Screenshot => "screenshot",
            StepKind::Run => "run",
            StepKind::Read => "read",
            StepKind::Write => "write",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub description: String,
}

impl ActionStep {
    pub fn new(kind: StepKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionMetadata {
    #[serde(default)]
    pub actions: Vec<ActionStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub description: String,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActionMetadata>,
}

impl AgentAction {
    pub fn new(
        id: impl Into<String>,
        kind: ActionKind,
        description: impl Into<String>,
        status: ActionStatus,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            status,
            result: None,
            timestamp: Local::now(),
            metadata: None,
        }
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn with_steps(mut self, steps: Vec<ActionStep>) -> Self {
        self.metadata = Some(ActionMetadata { actions: steps });
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn steps(&self) -> &[ActionStep] {
        self.metadata
            .as_ref()
            .map(|meta| meta.actions.as_slice())
            .unwrap_or(&[])
    }

    /// First `http://` or `https://` token embedded in the description.
    pub fn embedded_url(&self) -> Option<&str> {
        self.description
            .split_whitespace()
            .find(|word| word.starts_with("http://") || word.starts_with("https://"))
            .map(|word| word.trim_end_matches(|c: char| matches!(c, '.' | ',' | ')' | ';')))
    }
}

/// Produces ids of the form `<prefix>-<unix millis>-<sequence>`.
///
/// The sequence keeps ids unique when several records are created within
/// the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", prefix, Local::now().timestamp_millis(), seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_across_rapid_calls() {
        let ids = IdGenerator::new();
        let generated: HashSet<String> = (0..500).map(|_| ids.next("msg")).collect();
        assert_eq!(generated.len(), 500);
    }

    #[test]
    fn action_kinds_serialize_as_kebab_case() {
        let action = AgentAction::new(
            "a-1",
            ActionKind::WebNavigation,
            "Opening https://example.com",
            ActionStatus::Pending,
        );
        let json = serde_json::to_value(&action).expect("serialize");
        assert_eq!(json["type"], "web-navigation");
        assert_eq!(json["status"], "pending");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn embedded_url_strips_trailing_punctuation() {
        let action = AgentAction::new(
            "a-2",
            ActionKind::WebNavigation,
            "Navigating to https://docs.rs/ratatui.",
            ActionStatus::Completed,
        );
        assert_eq!(action.embedded_url(), Some("https://docs.rs/ratatui"));
    }

    #[test]
    fn steps_default_to_empty() {
        let action = AgentAction::new("a-3", ActionKind::FileOperation, "x", ActionStatus::Error);
        assert!(action.steps().is_empty());
    }

    #[test]
    fn author_is_omitted_from_json_when_unset() {
        let plain = serde_json::to_value(ChatMessage::user("u-1", "hi")).expect("serialize");
        assert!(plain.get("author").is_none());
        assert_eq!(plain["role"], "user");

        let signed = ChatMessage::assistant("a-1", "hello").with_author("Gemini Pro");
        let json = serde_json::to_value(&signed).expect("serialize");
        assert_eq!(json["author"], "Gemini Pro");
    }
}
