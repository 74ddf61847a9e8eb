//! WebSocket server and connection handling.

use crate::config::ServerConfig;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::{notifications, scheduled_reply, HostedSession};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use nim_core::{GameEvent, ScriptedTicket};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    pub config: ServerConfig,
    /// One session per connection, keyed by session ID
    pub sessions: DashMap<Uuid, HostedSession>,
    /// Mapping from session ID to its connection's message sender
    pub senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
            senders: DashMap::new(),
        }
    }

    /// Send a message to a session's connection.
    pub fn send_to(&self, session_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&session_id) {
            let _ = sender.send(msg);
        }
    }

    /// Send the current snapshot of a session.
    pub fn send_state(&self, session_id: Uuid) {
        let snapshot = self.sessions.get(&session_id).map(|s| s.snapshot());
        if let Some(state) = snapshot {
            self.send_to(session_id, ServerMessage::State { state });
        }
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Nim Race server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let session = HostedSession::new(Uuid::new_v4(), state.config.rules.clone())?;
    let session_id = session.id;
    state.sessions.insert(session_id, session);

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.senders.insert(session_id, tx);

    // Send welcome message
    let welcome = ServerMessage::Welcome { session_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text.into())).await?;
    state.send_state(session_id);

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) {
                    handle_message(session_id, client_msg, &state);
                } else {
                    warn!("Invalid message from {}: {}", session_id, text);
                }
            }
            Ok(Message::Close(_)) => {
                info!("Session {} closing connection", session_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to(session_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect; pending computer replies find nothing and drop
    state.sessions.remove(&session_id);
    state.senders.remove(&session_id);
    send_task.abort();

    info!("Connection closed for {}", session_id);
    Ok(())
}

/// Handle a client message.
fn handle_message(session_id: Uuid, msg: ClientMessage, state: &Arc<ServerState>) {
    let action = match msg {
        ClientMessage::Ping => {
            state.send_to(session_id, ServerMessage::Pong);
            return;
        }
        ClientMessage::GetState => {
            state.send_state(session_id);
            return;
        }
        other => match other.into_action() {
            Some(action) => action,
            None => return,
        },
    };

    let result = match state.sessions.get_mut(&session_id) {
        Some(mut session) => session.apply_action(action),
        None => {
            state.send_to(
                session_id,
                ServerMessage::Error {
                    message: "Session not found".to_string(),
                },
            );
            return;
        }
    };

    match result {
        Ok(events) => {
            state.send_to(
                session_id,
                ServerMessage::ActionResult {
                    success: true,
                    events: events.clone(),
                    error: None,
                },
            );
            publish(session_id, &events, state);
        }
        Err(e) => {
            debug!("Rejected input from {}: {}", session_id, e);
            state.send_to(
                session_id,
                ServerMessage::ActionResult {
                    success: false,
                    events: vec![],
                    error: Some(e.to_string()),
                },
            );
        }
    }
}

/// Push notifications and the new snapshot, and arm any computer reply.
fn publish(session_id: Uuid, events: &[GameEvent], state: &Arc<ServerState>) {
    for msg in notifications(events) {
        state.send_to(session_id, msg);
    }
    state.send_state(session_id);

    if let Some((ticket, delay_ms)) = scheduled_reply(events) {
        debug!(
            "Computer reply for {} due in {} ms ({:?})",
            session_id, delay_ms, ticket
        );
        let state = Arc::clone(state);
        tokio::spawn(async move {
            deliver_scripted_reply(session_id, ticket, Duration::from_millis(delay_ms), state)
                .await;
        });
    }
}

/// Wait out the pause, then play the computer's move.
///
/// A session that has gone away or moved on is left alone.
async fn deliver_scripted_reply(
    session_id: Uuid,
    ticket: ScriptedTicket,
    delay: Duration,
    state: Arc<ServerState>,
) {
    tokio::time::sleep(delay).await;

    let result = match state.sessions.get_mut(&session_id) {
        Some(mut session) => session.resolve(ticket),
        None => {
            debug!("Session {} gone before computer reply", session_id);
            return;
        }
    };

    match result {
        Ok(events) => {
            state.send_to(
                session_id,
                ServerMessage::ActionResult {
                    success: true,
                    events: events.clone(),
                    error: None,
                },
            );
            publish(session_id, &events, &state);
        }
        Err(e) => debug!("Dropped computer reply for {}: {}", session_id, e),
    }
}
