//! Message-passing boundary between the orchestrator and an agent backend.
//!
//! The orchestrator never waits on a backend directly. It hands an
//! [`AgentRequest`] to [`AgentService::spawn_response`], which runs the
//! backend on its own task and forwards every [`AgentEvent`] tagged with the
//! request's response id. The event loop drains the receiver and folds the
//! events back into [`crate::core::app::App`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::message::{AgentAction, ChatMessage};
use crate::core::registry::AgentDescriptor;

#[derive(Clone, Debug, PartialEq)]
pub enum AgentEvent {
    Message(ChatMessage),
    Action(AgentAction),
    Completed,
}

pub type AgentEventReceiver = mpsc::UnboundedReceiver<(AgentEvent, u64)>;

/// Everything a backend needs to produce one response.
#[derive(Clone, Debug)]
pub struct AgentRequest {
    pub prompt: String,
    pub agent: &'static AgentDescriptor,
    pub response_id: u64,
    pub cancel_token: CancellationToken,
}

/// Write half handed to a backend. Sends after the receiver is gone are
/// dropped silently.
#[derive(Clone)]
pub struct AgentEventSink {
    tx: mpsc::UnboundedSender<(AgentEvent, u64)>,
    response_id: u64,
    cancel_token: CancellationToken,
}

impl AgentEventSink {
    pub fn send(&self, event: AgentEvent) -> bool {
        if self.cancel_token.is_cancelled() {
            return false;
        }
        self.tx.send((event, self.response_id)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel_token.is_cancelled() || self.tx.is_closed()
    }
}

#[async_trait]
pub trait AgentBackend: Send + Sync {
    async fn respond(&self, request: AgentRequest, sink: AgentEventSink);
}

#[derive(Clone)]
pub struct AgentService {
    tx: mpsc::UnboundedSender<(AgentEvent, u64)>,
    backend: Arc<dyn AgentBackend>,
}

impl AgentService {
    pub fn new(backend: Arc<dyn AgentBackend>) -> (Self, AgentEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, backend }, rx)
    }

    pub fn spawn_response(&self, request: AgentRequest) -> tokio::task::JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let sink = AgentEventSink {
            tx: self.tx.clone(),
            response_id: request.response_id,
            cancel_token: request.cancel_token.clone(),
        };
        tokio::spawn(async move {
            let cancel_token = request.cancel_token.clone();
            let response_id = request.response_id;
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    debug!(response_id, "agent response cancelled");
                }
                _ = backend.respond(request, sink) => {
                    debug!(response_id, "agent response finished");
                }
            }
        })
    }
}
