//! WebSocket connection handler and event dispatch.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    domain::{MessageText, RoomName, Username, ValueObjectError},
    fanout,
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    registry::ConnectionId,
    time,
    ui::state::AppState,
    usecase::{
        CreateRoomError, CreateRoomUseCase, DeleteRoomError, DeleteRoomUseCase, JoinRoomError,
        JoinRoomUseCase, SendMessageError, SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel carrying serialized server events to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let conn_id = ConnectionId::new();
    let connected_at = time::now_millis();

    state.registry.lock().await.register(conn_id, tx.clone());
    tracing::info!(%conn_id, "client connected");

    // Task receiving events from this client
    let recv_state = state.clone();
    let recv_tx = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!(%conn_id, "websocket error: {e}");
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => handle_event(&recv_state, conn_id, &recv_tx, event).await,
                    Err(e) => {
                        tracing::warn!(%conn_id, "unparseable frame: {e}");
                        fanout::to_sender(
                            &recv_tx,
                            &ServerEvent::ErrorMessage {
                                text: "Malformed event.".to_string(),
                            },
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::info!(%conn_id, "client requested close");
                    break;
                }
                Message::Ping(_) => {
                    tracing::debug!(%conn_id, "received ping");
                }
                _ => {}
            }
        }
    });

    // Task forwarding queued server events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Transport disconnect: drop the connection and, if it was in a room,
    // refresh that room's presence and notify the remaining members.
    let mut registry = state.registry.lock().await;
    let binding = registry.deregister(conn_id);
    if let Some(binding) = binding {
        let users = registry
            .snapshot(&binding.room)
            .into_iter()
            .map(Username::into_string)
            .collect();
        fanout::to_room(&registry, &binding.room, &ServerEvent::UserList { users });
        fanout::to_room(
            &registry,
            &binding.room,
            &ServerEvent::Notification {
                text: format!("{} left the room.", binding.username),
            },
        );
    }
    tracing::info!(
        %conn_id,
        session_ms = time::now_millis() - connected_at,
        "client disconnected"
    );
}

/// Send a validation failure back to the offending connection only.
fn reject(tx: &UnboundedSender<String>, error: ValueObjectError) {
    fanout::to_sender(
        tx,
        &ServerEvent::ErrorMessage {
            text: error.to_string(),
        },
    );
}

/// Dispatch one inbound client event.
///
/// Replies and error signals go to `tx` (the sending connection); room and
/// directory updates fan out through the registry.
async fn handle_event(
    state: &Arc<AppState>,
    conn_id: ConnectionId,
    tx: &UnboundedSender<String>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::GetRooms => match state.directory.list().await {
            Ok(rooms) => fanout::to_sender(
                tx,
                &ServerEvent::RoomList {
                    rooms: rooms.into_iter().map(RoomName::into_string).collect(),
                },
            ),
            Err(e) => {
                tracing::error!(%conn_id, "room list read failed: {e}");
                fanout::to_sender(
                    tx,
                    &ServerEvent::ErrorMessage {
                        text: "Room list unavailable.".to_string(),
                    },
                );
            }
        },

        ClientEvent::CreateRoom { room } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let usecase = CreateRoomUseCase::new(state.directory.clone());
            match usecase.execute(name.clone()).await {
                Ok(rooms) => {
                    tracing::info!(%conn_id, room = %name, "room created");
                    let registry = state.registry.lock().await;
                    fanout::to_all(&registry, &ServerEvent::RoomList { rooms });
                }
                Err(CreateRoomError::AlreadyExists(_)) => fanout::to_sender(
                    tx,
                    &ServerEvent::ErrorMessage {
                        text: "Room already exists!".to_string(),
                    },
                ),
                Err(CreateRoomError::Store(e)) => {
                    tracing::error!(%conn_id, room = %name, "room creation failed: {e}");
                    fanout::to_sender(
                        tx,
                        &ServerEvent::ErrorMessage {
                            text: "Room could not be created.".to_string(),
                        },
                    );
                }
            }
        }

        ClientEvent::DeleteRoom { room, username } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let requester = match Username::try_from(username) {
                Ok(requester) => requester,
                Err(e) => return reject(tx, e),
            };
            let usecase = DeleteRoomUseCase::new(
                state.directory.clone(),
                state.messages.clone(),
                state.admin.clone(),
            );
            match usecase.execute(name.clone(), &requester).await {
                Ok(rooms) => {
                    tracing::info!(%conn_id, room = %name, "room deleted");
                    state.send_locks.remove(&name).await;
                    let registry = state.registry.lock().await;
                    fanout::to_all(&registry, &ServerEvent::RoomList { rooms });
                    fanout::to_room(
                        &registry,
                        &name,
                        &ServerEvent::RoomDeleted {
                            room: name.as_str().to_string(),
                        },
                    );
                }
                // Ignored without a client-visible signal, the protocol's
                // default behavior for non-administrators.
                Err(DeleteRoomError::Unauthorized(user)) => {
                    tracing::warn!(%conn_id, user = %user, room = %name, "unauthorized room deletion ignored");
                }
                Err(DeleteRoomError::Reserved(_)) => fanout::to_sender(
                    tx,
                    &ServerEvent::ErrorMessage {
                        text: format!("Room '{name}' cannot be deleted."),
                    },
                ),
                Err(DeleteRoomError::Store(e)) => {
                    tracing::error!(%conn_id, room = %name, "room deletion failed: {e}");
                    fanout::to_sender(
                        tx,
                        &ServerEvent::ErrorMessage {
                            text: "Room could not be deleted.".to_string(),
                        },
                    );
                }
            }
        }

        ClientEvent::JoinRoom { room, username } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let username = match Username::try_from(username) {
                Ok(username) => username,
                Err(e) => return reject(tx, e),
            };

            {
                let mut registry = state.registry.lock().await;
                let previous = registry.bind(conn_id, name.clone(), username.clone());
                // A rebind without an explicit leave refreshes the old
                // room's presence instead of leaving it stale.
                if let Some(previous) = previous {
                    let users = registry
                        .snapshot(&previous)
                        .into_iter()
                        .map(Username::into_string)
                        .collect();
                    fanout::to_room(&registry, &previous, &ServerEvent::UserList { users });
                }
                let users = registry
                    .snapshot(&name)
                    .into_iter()
                    .map(Username::into_string)
                    .collect();
                fanout::to_room(&registry, &name, &ServerEvent::UserList { users });
            }
            tracing::info!(%conn_id, room = %name, user = %username, "joined room");

            // History replay, to the joining connection only
            let usecase = JoinRoomUseCase::new(state.messages.clone());
            match usecase.execute(&name, state.history_limit).await {
                Ok(messages) => fanout::to_sender(
                    tx,
                    &ServerEvent::MessageHistory {
                        messages: messages.into_iter().map(Into::into).collect(),
                    },
                ),
                Err(JoinRoomError::Store(e)) => {
                    tracing::error!(%conn_id, room = %name, "history replay failed: {e}");
                    fanout::to_sender(
                        tx,
                        &ServerEvent::ErrorMessage {
                            text: "Message history unavailable.".to_string(),
                        },
                    );
                }
            }
        }

        ClientEvent::LeaveRoom { room, username: _ } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let mut registry = state.registry.lock().await;
            // The binding is authoritative for who is leaving; a leave for
            // a room the connection is not in is ignored.
            let Some(binding) = registry.binding_of(conn_id).cloned() else {
                return;
            };
            if binding.room != name {
                tracing::debug!(%conn_id, room = %name, "ignoring leave for an unbound room");
                return;
            }
            registry.unbind(conn_id);
            let users = registry
                .snapshot(&name)
                .into_iter()
                .map(Username::into_string)
                .collect();
            fanout::to_room(&registry, &name, &ServerEvent::UserList { users });
            fanout::to_room(
                &registry,
                &name,
                &ServerEvent::Notification {
                    text: format!("{} left the room.", binding.username),
                },
            );
            tracing::info!(%conn_id, room = %name, user = %binding.username, "left room");
        }

        ClientEvent::ChatMessage {
            room,
            username,
            text,
            display_time,
        } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let username = match Username::try_from(username) {
                Ok(username) => username,
                Err(e) => return reject(tx, e),
            };
            let text = match MessageText::try_from(text) {
                Ok(text) => text,
                Err(e) => return reject(tx, e),
            };

            let outbound = ServerEvent::ChatMessage {
                username: username.as_str().to_string(),
                text: text.as_str().to_string(),
                display_time: display_time.clone(),
            };
            let message =
                crate::domain::StoredMessage::new(name.clone(), username, text, display_time);

            // Held across append + fanout so fanout order matches store
            // order within this room.
            let _guard = state.send_locks.acquire(&name).await;

            let usecase = SendMessageUseCase::new(state.messages.clone());
            match usecase.execute(message).await {
                Ok(()) => {
                    let registry = state.registry.lock().await;
                    fanout::to_room(&registry, &name, &outbound);
                }
                Err(SendMessageError::Store(e)) => {
                    // Failed appends are never fanned out; only the sender
                    // hears about them.
                    tracing::error!(%conn_id, room = %name, "message append failed: {e}");
                    fanout::to_sender(
                        tx,
                        &ServerEvent::ErrorMessage {
                            text: "Message could not be delivered.".to_string(),
                        },
                    );
                }
            }
        }

        ClientEvent::Typing { room, username } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let username = match Username::try_from(username) {
                Ok(username) => username,
                Err(e) => return reject(tx, e),
            };
            let registry = state.registry.lock().await;
            fanout::to_room_except(
                &registry,
                &name,
                conn_id,
                &ServerEvent::Typing {
                    username: username.into_string(),
                },
            );
        }

        ClientEvent::StopTyping { room, username } => {
            let name = match RoomName::try_from(room) {
                Ok(name) => name,
                Err(e) => return reject(tx, e),
            };
            let username = match Username::try_from(username) {
                Ok(username) => username,
                Err(e) => return reject(tx, e),
            };
            let registry = state.registry.lock().await;
            fanout::to_room_except(
                &registry,
                &name,
                conn_id,
                &ServerEvent::StopTyping {
                    username: username.into_string(),
                },
            );
        }
    }
}
