//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};

use crate::{
    domain::{RoomId, UserId},
    infrastructure::dto::http::{AddMemberRequest, CreateRoomRequest, MessageDto, RoomDto},
    ui::state::AppState,
    usecase::{AddMemberError, CreateRoomError, HistoryError},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Resolve the calling user from the `Authorization: Bearer` header.
async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<UserId, StatusCode> {
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    state
        .resolver
        .resolve(credential)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

fn parse_room_id(raw: String) -> Result<RoomId, StatusCode> {
    RoomId::new(raw).map_err(|_| StatusCode::BAD_REQUEST)
}

/// Create a room; the caller becomes admin and first member
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateRoomRequest>,
) -> Result<Json<RoomDto>, StatusCode> {
    let user_id = current_user(&state, &headers).await?;

    match state.create_room_usecase.execute(user_id, body.name).await {
        Ok(room) => Ok(Json(RoomDto::from(&room))),
        Err(CreateRoomError::InvalidName(_)) => Err(StatusCode::BAD_REQUEST),
        Err(CreateRoomError::Repository(_)) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// List the caller's rooms
pub async fn get_user_rooms(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<RoomDto>>, StatusCode> {
    let user_id = current_user(&state, &headers).await?;

    let rooms = state
        .get_user_rooms_usecase
        .execute(&user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(rooms.iter().map(RoomDto::from).collect()))
}

/// Add a member to a room (admin only)
pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<AddMemberRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let user_id = current_user(&state, &headers).await?;
    let room_id = parse_room_id(room_id)?;

    match state
        .add_member_usecase
        .execute(&user_id, &room_id, body.user_id)
        .await
    {
        Ok(()) => Ok(Json(serde_json::json!({"status": "ok"}))),
        Err(AddMemberError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(AddMemberError::NotAdmin) => Err(StatusCode::FORBIDDEN),
        Err(AddMemberError::InvalidUserId(_)) => Err(StatusCode::BAD_REQUEST),
        Err(AddMemberError::AlreadyMember(_)) => Err(StatusCode::CONFLICT),
        Err(AddMemberError::Repository(_)) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Message history for a room (members only, newest first)
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let user_id = current_user(&state, &headers).await?;
    let room_id = parse_room_id(room_id)?;

    match state
        .get_room_messages_usecase
        .execute(&user_id, &room_id)
        .await
    {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(HistoryError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(HistoryError::AccessDenied) => Err(StatusCode::FORBIDDEN),
        Err(HistoryError::Repository(_)) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
