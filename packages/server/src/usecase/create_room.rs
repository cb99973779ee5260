//! UseCase: ルーム作成処理

use std::sync::Arc;

use crate::domain::{ChatRepository, Room, RoomName, UserId};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// ルーム作成を実行
    ///
    /// 作成者が管理者・最初のメンバーになる。
    pub async fn execute(&self, admin_id: UserId, name: String) -> Result<Room, CreateRoomError> {
        let name = RoomName::new(name)?;
        let room = self
            .repository
            .create_room(name, admin_id)
            .await
            .map_err(CreateRoomError::Repository)?;
        tracing::info!(room = %room.id, name = %room.name, "room created");
        Ok(room)
    }
}
