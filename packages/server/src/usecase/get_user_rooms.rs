//! UseCase: 所属ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{ChatRepository, RepositoryError, Room, UserId};

/// 所属ルーム一覧取得のユースケース
pub struct GetUserRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl GetUserRoomsUseCase {
    /// 新しい GetUserRoomsUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 呼び出しユーザーが所属するルームの一覧を取得
    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<Room>, RepositoryError> {
        self.repository.rooms_for_user(user_id).await
    }
}
