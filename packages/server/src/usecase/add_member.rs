//! UseCase: メンバー追加処理

use std::sync::Arc;

use crate::domain::{ChatRepository, RepositoryError, RoomError, RoomId, UserId};

use super::error::AddMemberError;

/// メンバー追加のユースケース
pub struct AddMemberUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl AddMemberUseCase {
    /// 新しい AddMemberUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// メンバー追加を実行
    ///
    /// メンバーを追加できるのはルームの管理者のみ。
    pub async fn execute(
        &self,
        caller_id: &UserId,
        room_id: &RoomId,
        new_member: String,
    ) -> Result<(), AddMemberError> {
        let new_member = UserId::new(new_member)?;

        let room = self
            .repository
            .find_room(room_id)
            .await
            .map_err(|err| match err {
                RepositoryError::RoomNotFound(_) => AddMemberError::RoomNotFound,
                other => AddMemberError::Repository(other),
            })?;
        if &room.admin_id != caller_id {
            return Err(AddMemberError::NotAdmin);
        }

        self.repository
            .add_member(room_id, new_member.clone())
            .await
            .map_err(|err| match err {
                RepositoryError::Room(RoomError::AlreadyMember(user)) => {
                    AddMemberError::AlreadyMember(user)
                }
                RepositoryError::RoomNotFound(_) => AddMemberError::RoomNotFound,
                other => AddMemberError::Repository(other),
            })?;

        tracing::info!(room = %room_id, user = %new_member, "member added to room");
        Ok(())
    }
}
