//! Shared application state.

use std::sync::Arc;

use crate::domain::IdentityResolver;
use crate::usecase::{
    AddMemberUseCase, ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
    GetRoomMessagesUseCase, GetUserRoomsUseCase, SendMessageUseCase,
};

/// Shared application state handed to every handler.
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// AddMemberUseCase（メンバー追加のユースケース）
    pub add_member_usecase: Arc<AddMemberUseCase>,
    /// GetRoomMessagesUseCase（履歴取得のユースケース）
    pub get_room_messages_usecase: Arc<GetRoomMessagesUseCase>,
    /// GetUserRoomsUseCase（所属ルーム一覧のユースケース）
    pub get_user_rooms_usecase: Arc<GetUserRoomsUseCase>,
    /// HTTP ハンドラが Bearer トークンを解決するための IdentityResolver
    pub resolver: Arc<dyn IdentityResolver>,
}
