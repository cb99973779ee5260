//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（Gateway / HTTP ハンドラ）から呼び出され、Domain 層のポートと
//! Engine 層を操作します。

pub mod add_member;
pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_messages;
pub mod get_user_rooms;
pub mod send_message;

pub use add_member::AddMemberUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{AddMemberError, ConnectError, CreateRoomError, HistoryError, SendMessageError};
pub use get_room_messages::GetRoomMessagesUseCase;
pub use get_user_rooms::GetUserRoomsUseCase;
pub use send_message::SendMessageUseCase;
