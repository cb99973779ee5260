//! WebSocket connection handlers (the connection gateway).

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::stream::StreamExt;
use serde::Deserialize;

use crate::{
    domain::{ClientConnection, RoomId, UserId},
    infrastructure::{connection::WsClientConnection, dto::websocket::ChatFrame},
    ui::state::AppState,
    usecase::{ConnectError, SendMessageError},
};

/// Idle connections are reaped after this long without any inbound frame.
/// Every received frame (pings included) refreshes the deadline.
const READ_DEADLINE: Duration = Duration::from_secs(60);

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: String,
}

/// Accept an inbound streaming connection for a room.
///
/// The credential is resolved and membership checked before the upgrade;
/// non-upgradeable requests are rejected by the extractor with a client
/// error before this handler runs.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let room_id = match RoomId::new(room_id) {
        Ok(room_id) => room_id,
        Err(err) => {
            tracing::warn!(%err, "rejecting connection with invalid room id");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let user_id = match state
        .connect_participant_usecase
        .authenticate(&query.token)
        .await
    {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::warn!(room = %room_id, %err, "rejecting unauthenticated connection");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    if let Err(err) = state
        .connect_participant_usecase
        .authorize(&room_id, &user_id)
        .await
    {
        tracing::warn!(room = %room_id, user = %user_id, %err, "rejecting connection");
        return Err(match err {
            ConnectError::RoomNotFound => StatusCode::NOT_FOUND,
            ConnectError::AccessDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        });
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_id, user_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId, user_id: UserId) {
    let (sink, mut stream) = socket.split();
    let connection: Arc<dyn ClientConnection> = Arc::new(WsClientConnection::new(sink));

    if let Err(err) = state
        .connect_participant_usecase
        .execute(&room_id, user_id.clone(), Arc::clone(&connection))
        .await
    {
        tracing::warn!(room = %room_id, user = %user_id, %err, "failed to register participant");
        connection.close().await;
        return;
    }
    tracing::info!(room = %room_id, user = %user_id, "participant connected");

    // Read loop: every received frame refreshes the read deadline.
    loop {
        let frame = match tokio::time::timeout(READ_DEADLINE, stream.next()).await {
            Err(_) => {
                tracing::info!(room = %room_id, user = %user_id, "read deadline expired, closing idle connection");
                break;
            }
            Ok(None) => break,
            Ok(Some(Err(err))) => {
                tracing::info!(room = %room_id, user = %user_id, %err, "websocket transport error");
                break;
            }
            Ok(Some(Ok(frame))) => frame,
        };

        match frame {
            WsMessage::Text(text) => {
                // content のみをデコードし、送信者・ルームはサーバー側で刻印する
                let chat_frame: ChatFrame = match serde_json::from_str(&text) {
                    Ok(frame) => frame,
                    Err(err) => {
                        tracing::warn!(room = %room_id, user = %user_id, %err, "malformed chat frame, closing connection");
                        break;
                    }
                };

                match state
                    .send_message_usecase
                    .execute(user_id.clone(), room_id.clone(), chat_frame.content)
                    .await
                {
                    Ok(message) => {
                        tracing::debug!(room = %room_id, message = %message.id, "message published");
                    }
                    Err(SendMessageError::InvalidContent(err)) => {
                        tracing::warn!(room = %room_id, user = %user_id, %err, "invalid message content, closing connection");
                        break;
                    }
                    Err(SendMessageError::PublishFailed(err)) => {
                        // 配送が保証できないため接続を閉じ、クライアントに再送させる
                        tracing::error!(room = %room_id, user = %user_id, %err, "publish failed, closing connection");
                        break;
                    }
                }
            }
            // Keepalive: axum answers pings at the protocol level; receiving
            // either control frame just refreshed the read deadline.
            WsMessage::Ping(_) | WsMessage::Pong(_) => {}
            WsMessage::Close(_) => {
                tracing::info!(room = %room_id, user = %user_id, "client requested close");
                break;
            }
            WsMessage::Binary(_) => {
                tracing::warn!(room = %room_id, user = %user_id, "binary frames are not part of the protocol, closing connection");
                break;
            }
        }
    }

    // Loop exit (any reason): always unregister; the last participant's exit
    // tears the room engine down via the registry.
    state
        .disconnect_participant_usecase
        .execute(&room_id, &user_id, &connection)
        .await;
    tracing::info!(room = %room_id, user = %user_id, "participant disconnected");
}
