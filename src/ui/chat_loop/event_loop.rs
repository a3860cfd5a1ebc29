//! Event polling, dispatching, and UI rendering loop.
//!
//! The loop wraps the shared [`App`](crate::core::app::App) in an async
//! mutex. Each iteration draws a frame if one was requested, drains
//! terminal events, forwards agent events for the current response and
//! applies every queued action. Commands produced by actions are executed
//! here, outside the lock.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use crate::core::agent_service::{AgentBackend, AgentEventReceiver, AgentService};
use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand,
};
use crate::ui::renderer::ui;

use super::keybindings::{build_mode_aware_registry, KeyResult, ModeAwareRegistry};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::mouse::mouse_actions;
use super::AppHandle;

const MAX_FPS: u64 = 60;
const THINKING_FRAME: Duration = Duration::from_millis(250);
const IDLE_REFRESH: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

async fn is_exit_requested(app: &AppHandle) -> bool {
    app.read(|app| app.ui.exit_requested).await
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    (app.update(|app| terminal_guard.draw(|f| ui(f, app))).await)?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
}

fn action_context(term_size: Size) -> AppActionContext {
    AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    }
}

async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    mode_registry: &ModeAwareRegistry,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
    };
    let ctx = action_context(term_size);

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let result = app.read(|app| mode_registry.resolve(app, &key)).await;
                match result {
                    KeyResult::Dispatch(action) => {
                        dispatcher.dispatch(action, ctx);
                        outcome.request_redraw = true;
                    }
                    KeyResult::NotHandled => {}
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                if !text.is_empty() {
                    dispatcher.dispatch(AppAction::InsertIntoInput { text }, ctx);
                    outcome.request_redraw = true;
                }
            }
            UiEvent::Crossterm(Event::Mouse(mouse)) => {
                let actions = app
                    .read(|app| mouse_actions(&mouse, &app.ui.regions, app.ui.panes.is_resizing()))
                    .await;
                if !actions.is_empty() {
                    dispatcher.dispatch_many(actions, ctx);
                    outcome.request_redraw = true;
                }
            }
            // Losing the pointer ends any drag in progress
            UiEvent::Crossterm(Event::FocusLost) => {
                let resizing = app.read(|app| app.ui.panes.is_resizing()).await;
                if resizing {
                    dispatcher.dispatch(AppAction::EndResize, ctx);
                    outcome.request_redraw = true;
                }
            }
            UiEvent::Crossterm(Event::Resize(_, _)) => {
                outcome.request_redraw = true;
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    outcome
}

/// Forward agent events for the current response. Events tagged with any
/// other response id are dropped here.
fn process_agent_events(
    dispatcher: &AppActionDispatcher,
    rx: &mut AgentEventReceiver,
    term_size: Size,
    current_response_id: u64,
) -> bool {
    let mut actions = Vec::new();
    while let Ok((event, response_id)) = rx.try_recv() {
        if response_id != current_response_id {
            debug!(response_id, current_response_id, "skipping stale agent event");
            continue;
        }
        actions.push(AppAction::AgentEventReceived { event, response_id });
    }

    if actions.is_empty() {
        return false;
    }
    dispatcher.dispatch_many(actions, action_context(term_size));
    true
}

async fn drain_action_queue(
    app: &AppHandle,
    agent_service: &AgentService,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    for cmd in commands {
        match cmd {
            AppCommand::SpawnResponse(request) => {
                agent_service.spawn_response(request);
            }
        }
    }
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(app: App, backend: Arc<dyn AgentBackend>) -> Result<(), Box<dyn Error>> {
    let app = AppHandle::new(Arc::new(Mutex::new(app)));
    let agent = app.read(|app| app.selected_agent().id).await;
    info!(agent, "starting chat session");

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);
    let (agent_service, mut agent_rx) = AgentService::new(backend);

    let terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let mode_registry = build_mode_aware_registry();

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if is_exit_requested(&app).await {
            break 'main_loop Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break 'main_loop Err(err.into());
        }

        let term_size = current_terminal_size(&terminal).await;

        let event_outcome = process_ui_events(
            &app,
            &mut event_rx,
            &mode_registry,
            &action_dispatcher,
            term_size,
        )
        .await;
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        let current_response_id = app.read(|app| app.session.current_response_id).await;
        let received_any = process_agent_events(
            &action_dispatcher,
            &mut agent_rx,
            term_size,
            current_response_id,
        );

        let actions_applied = drain_action_queue(&app, &agent_service, &mut action_rx).await;
        if received_any || actions_applied {
            request_redraw = true;
        }

        // Keep the thinking dots moving and let the LIVE badge expire
        let thinking = app.read(|app| app.session.is_thinking).await;
        let since_draw = last_draw.elapsed();
        if (thinking && since_draw >= THINKING_FRAME) || since_draw >= IDLE_REFRESH {
            request_redraw = true;
        }

        let idle = !event_outcome.events_processed && !received_any && !request_redraw;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    app.update(|app| app.conversation().cancel_pending_response())
        .await;
    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    info!("chat session ended");

    result
}
