//! UseCase: メッセージ履歴取得処理

use std::sync::Arc;

use crate::domain::{ChatRepository, Message, RepositoryError, RoomId, UserId};

use super::error::HistoryError;

/// メッセージ履歴取得のユースケース
pub struct GetRoomMessagesUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomMessagesUseCase {
    /// 新しい GetRoomMessagesUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 履歴取得を実行（メンバーのみ、新しい順）
    pub async fn execute(
        &self,
        caller_id: &UserId,
        room_id: &RoomId,
    ) -> Result<Vec<Message>, HistoryError> {
        let has_access = self
            .repository
            .check_access(room_id, caller_id)
            .await
            .map_err(|err| match err {
                RepositoryError::RoomNotFound(_) => HistoryError::RoomNotFound,
                other => HistoryError::Repository(other),
            })?;
        if !has_access {
            return Err(HistoryError::AccessDenied);
        }

        self.repository
            .load_messages(room_id)
            .await
            .map_err(HistoryError::Repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessageContent, MessageIdFactory, Room, RoomIdFactory, RoomName, Timestamp,
    };
    use crate::infrastructure::repository::InMemoryChatRepository;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    async fn usecase_with_history() -> (GetRoomMessagesUseCase, Room) {
        let repository = Arc::new(InMemoryChatRepository::new());
        let room = repository
            .create_room(RoomName::new("general".to_string()).unwrap(), user("alice"))
            .await
            .unwrap();
        for (content, at) in [("first", 1), ("second", 2)] {
            repository
                .save_message(&Message::new(
                    MessageIdFactory::generate(),
                    user("alice"),
                    room.id.clone(),
                    MessageContent::new(content.to_string()).unwrap(),
                    Timestamp::new(at),
                ))
                .await
                .unwrap();
        }
        (GetRoomMessagesUseCase::new(repository), room)
    }

    #[tokio::test]
    async fn test_member_reads_history_newest_first() {
        // テスト項目: メンバーは履歴を新しい順で取得できる
        // given (前提条件):
        let (usecase, room) = usecase_with_history().await;

        // when (操作):
        let messages = usecase.execute(&user("alice"), &room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content.as_str(), "second");
        assert_eq!(messages[1].content.as_str(), "first");
    }

    #[tokio::test]
    async fn test_non_member_is_denied() {
        // テスト項目: メンバー以外は履歴を取得できない
        // given (前提条件):
        let (usecase, room) = usecase_with_history().await;

        // when (操作):
        let result = usecase.execute(&user("mallory"), &room.id).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), HistoryError::AccessDenied);
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        // テスト項目: 存在しないルームの履歴取得は RoomNotFound になる
        // given (前提条件):
        let (usecase, _room) = usecase_with_history().await;

        // when (操作):
        let result = usecase
            .execute(&user("alice"), &RoomIdFactory::generate())
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), HistoryError::RoomNotFound);
    }
}
