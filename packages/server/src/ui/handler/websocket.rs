//! WebSocket connection handlers (connection gateway).

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionIdFactory, DisplayName, Member, RoomId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::{AppState, ConnectQuery},
    usecase::{JoinRoomUseCase, LeaveRoomUseCase, Outcome, SendChatUseCase, SyncStateUseCase},
};

/// Largest inbound WebSocket message accepted from a client (16 MiB)
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

/// Handshake rejection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Room id or display name missing or malformed
    #[error("Invalid join: {0}")]
    InvalidJoin(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // no payload: the client only observes a refused connection
        StatusCode::BAD_REQUEST.into_response()
    }
}

/// Validate the handshake and bind the connection to its room and identity.
pub fn accept(query: ConnectQuery) -> Result<(RoomId, DisplayName), GatewayError> {
    let room_id = query
        .room_id
        .ok_or_else(|| GatewayError::InvalidJoin("missing roomId".to_string()))
        .and_then(|id| {
            RoomId::try_from(id).map_err(|e| GatewayError::InvalidJoin(e.to_string()))
        })?;
    let display_name = query
        .user_name
        .ok_or_else(|| GatewayError::InvalidJoin("missing userName".to_string()))
        .and_then(|name| {
            DisplayName::try_from(name).map_err(|e| GatewayError::InvalidJoin(e.to_string()))
        })?;
    Ok((room_id, display_name))
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let (room_id, display_name) = accept(query).inspect_err(|e| {
        tracing::warn!("Rejecting connection: {}", e);
    })?;

    let member = Member::new(ConnectionIdFactory::generate(), display_name);
    tracing::info!(
        "Connection '{}' ({}) accepted for room '{}'",
        member.connection_id,
        member.display_name,
        room_id
    );

    Ok(ws
        .max_message_size(MAX_MESSAGE_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, state, room_id, member)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId, member: Member) {
    let (mut sender, mut receiver) = socket.split();

    // Outbound queue for this connection; the registry pushes frames into it
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let join_usecase = JoinRoomUseCase::new(state.repository.clone());
    match join_usecase
        .execute(room_id.clone(), member.clone(), tx)
        .await
    {
        Ok(count) => {
            tracing::info!(
                "'{}' joined room '{}' ({} member(s))",
                member.display_name,
                room_id,
                count
            );
        }
        Err(e) => {
            tracing::warn!("Failed to join room '{}': {}", room_id, e);
            return;
        }
    }

    // Spawn a task that writes queued frames to this client
    let connection_id = member.connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::debug!("Failed to write to '{}': {}", connection_id, e);
                break;
            }
        }
    });

    // Spawn a task that reads frames from this client
    let recv_state = state.clone();
    let recv_member = member.clone();
    let recv_room_id = room_id.clone();
    let mut recv_task = tokio::spawn(async move {
        let sync_usecase = SyncStateUseCase::new(recv_state.repository.clone());
        let chat_usecase = SendChatUseCase::new(recv_state.repository.clone());

        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", recv_member.connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_frame(
                        &sync_usecase,
                        &chat_usecase,
                        &recv_room_id,
                        &recv_member,
                        text.as_str(),
                    )
                    .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_member.connection_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket layer
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Graceful close and network loss are handled the same way
    let leave_usecase = LeaveRoomUseCase::new(state.repository.clone());
    match leave_usecase.execute(&room_id, &member.connection_id).await {
        Ok(outcome) => {
            tracing::info!(
                "'{}' left room '{}' ({} remaining{})",
                member.display_name,
                room_id,
                outcome.remaining,
                if outcome.room_removed { ", room removed" } else { "" }
            );
        }
        Err(e) => {
            tracing::warn!("Failed to remove '{}' from room: {}", member.connection_id, e);
        }
    }
}

/// Parse one inbound frame and route it to the matching use case.
///
/// A connection only ever acts on the room it joined. Nothing is reported
/// back to the client: bad frames and frames naming another room are logged
/// and dropped.
async fn handle_client_frame(
    sync_usecase: &SyncStateUseCase,
    chat_usecase: &SendChatUseCase,
    room_id: &RoomId,
    member: &Member,
    text: &str,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Dropping unparsable frame from '{}': {}",
                member.connection_id,
                e
            );
            return;
        }
    };

    if !targets_room(&event, room_id) {
        tracing::debug!(
            "Dropping frame from '{}' addressed to a room other than '{}'",
            member.connection_id,
            room_id
        );
        return;
    }

    let outcome = match event {
        ClientEvent::CodeChange { code, .. } => {
            sync_usecase
                .update_code(room_id, &member.connection_id, code)
                .await
        }
        ClientEvent::LanguageChange { language, .. } => {
            sync_usecase
                .update_language(room_id, &member.connection_id, language)
                .await
        }
        ClientEvent::ChatMessage { message, .. } => {
            chat_usecase
                .execute(room_id, member, message.id, message.text)
                .await
        }
    };

    if outcome == Outcome::Ignored {
        tracing::debug!("Room '{}' not found, frame ignored", room_id);
    }
}

/// Whether the frame's `roomId` names the room the connection is bound to
fn targets_room(event: &ClientEvent, bound: &RoomId) -> bool {
    let target = match event {
        ClientEvent::CodeChange { room_id, .. }
        | ClientEvent::LanguageChange { room_id, .. }
        | ClientEvent::ChatMessage { room_id, .. } => room_id,
    };
    target == bound.as_str()
}
