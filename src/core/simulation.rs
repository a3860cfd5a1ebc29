//! Canned agent that answers every prompt after a fixed delay.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tracing::info;

use crate::core::agent_service::{AgentBackend, AgentEvent, AgentEventSink, AgentRequest};
use crate::core::message::{
    ActionKind, ActionStatus, ActionStep, AgentAction, ChatMessage, IdGenerator, StepKind,
};

pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(2000);

const DEMO_URL: &str = "https://www.typescriptlang.org/docs/handbook/2/functions.html";

pub struct SimulatedAgent {
    delay: Duration,
    ids: IdGenerator,
}

impl SimulatedAgent {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ids: IdGenerator::new(),
        }
    }

    pub fn reply_for(&self, request: &AgentRequest) -> ChatMessage {
        let content = format!(
            "```typescript\nfunction greet(name: string) {{\n  return `Hello, ${{name}}!`;\n}}\n```\n\n\
I've created a simple TypeScript greeting function. Let me demonstrate how it works:\n\n\
| Step | Tool | Outcome |\n|------|------|---------|\n\
| 1 | Browser | Read the [function handbook]({DEMO_URL}) |\n\
| 2 | Runtime | Ran `greet(\"User\")` |\n\
| 3 | Files | Saved `src/greet.ts` |\n\n\
_Answered by **{}**._",
            request.agent.name
        );
        ChatMessage::assistant(self.ids.next("msg"), content).with_author(request.agent.name)
    }

    pub fn actions_for(&self, _request: &AgentRequest) -> Vec<AgentAction> {
        let now = Local::now();
        vec![
            AgentAction::new(
                self.ids.next("action"),
                ActionKind::WebNavigation,
                format!("Reading TypeScript handbook at {DEMO_URL}"),
                ActionStatus::Completed,
            )
            .with_timestamp(now)
            .with_steps(vec![
                ActionStep::new(StepKind::Navigate, format!("Open {DEMO_URL}")),
                ActionStep::new(StepKind::Scroll, "Scroll to \"Function Type Expressions\""),
                ActionStep::new(StepKind::Extract, "Extract the greeting example"),
                ActionStep::new(StepKind::Screenshot, "Capture the visible section"),
            ]),
            AgentAction::new(
                self.ids.next("action"),
                ActionKind::CodeExecution,
                "Running TypeScript code",
                ActionStatus::Completed,
            )
            .with_timestamp(now)
            .with_result("Hello, User!")
            .with_steps(vec![
                ActionStep::new(StepKind::Write, "Compile greet.ts with tsc"),
                ActionStep::new(StepKind::Run, "node greet.js"),
            ]),
            AgentAction::new(
                self.ids.next("action"),
                ActionKind::FileOperation,
                "Saving src/greet.ts",
                ActionStatus::Completed,
            )
            .with_timestamp(now)
            .with_result("wrote 3 lines (72 bytes)"),
        ]
    }
}

impl Default for SimulatedAgent {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_DELAY)
    }
}

#[async_trait]
impl AgentBackend for SimulatedAgent {
    async fn respond(&self, request: AgentRequest, sink: AgentEventSink) {
        tokio::time::sleep(self.delay).await;
        if sink.is_closed() {
            return;
        }

        let reply = self.reply_for(&request);
        let actions = self.actions_for(&request);
        info!(
            response_id = request.response_id,
            agent = request.agent.id,
            actions = actions.len(),
            "simulated response ready"
        );

        sink.send(AgentEvent::Message(reply));
        for action in actions {
            sink.send(AgentEvent::Action(action));
        }
        sink.send(AgentEvent::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent_service::AgentService;
    use crate::core::registry;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn request(cancel_token: CancellationToken) -> AgentRequest {
        AgentRequest {
            prompt: "Hello".into(),
            agent: registry::find("deepseek-r1").expect("registered"),
            response_id: 3,
            cancel_token,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn responds_after_delay_with_message_actions_and_completion() {
        let (service, mut rx) = AgentService::new(Arc::new(SimulatedAgent::default()));
        let handle = service.spawn_response(request(CancellationToken::new()));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err(), "no events before the delay elapses");

        handle.await.expect("task");
        let mut events = Vec::new();
        while let Ok((event, id)) = rx.try_recv() {
            assert_eq!(id, 3);
            events.push(event);
        }

        let messages = events
            .iter()
            .filter(|e| matches!(e, AgentEvent::Message(_)))
            .count();
        let actions = events
            .iter()
            .filter(|e| matches!(e, AgentEvent::Action(_)))
            .count();
        assert_eq!(messages, 1);
        assert!(actions > 0);
        assert_eq!(events.last(), Some(&AgentEvent::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_request_emits_nothing() {
        let (service, mut rx) = AgentService::new(Arc::new(SimulatedAgent::default()));
        let token = CancellationToken::new();
        let handle = service.spawn_response(request(token.clone()));

        tokio::time::sleep(Duration::from_millis(500)).await;
        token.cancel();
        handle.await.expect("task");

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reply_names_the_selected_agent() {
        let agent = SimulatedAgent::default();
        let reply = agent.reply_for(&request(CancellationToken::new()));
        assert!(reply.is_assistant());
        assert_eq!(reply.author.as_deref(), Some("DeepSeek Reasoner"));
        assert!(reply.content.contains("DeepSeek Reasoner"));
        assert!(reply.content.contains("```typescript"));
    }

    #[test]
    fn batch_covers_every_action_kind() {
        let agent = SimulatedAgent::default();
        let actions = agent.actions_for(&request(CancellationToken::new()));
        let kinds: Vec<ActionKind> = actions.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::WebNavigation,
                ActionKind::CodeExecution,
                ActionKind::FileOperation
            ]
        );
        assert_eq!(actions[1].result.as_deref(), Some("Hello, User!"));
        assert!(actions[0].embedded_url().is_some());
    }
}
