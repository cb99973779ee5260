//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! リレーショナル DB（ユーザー・ルーム・メッセージの永続化）は外部
//! コラボレータの責務で、このバックエンドは trait 越しにしか触らない。
//! PostgreSQL 実装を追加する際も、このファイルと同じ型変換の境界で済む。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hiroma_shared::time::get_unix_timestamp;

use crate::domain::{
    ChatRepository, Message, RepositoryError, Room, RoomId, RoomIdFactory, RoomName, Timestamp,
    UserId,
};

struct Store {
    rooms: HashMap<RoomId, Room>,
    /// ルームごとのメッセージ履歴（挿入順 = 古い順）
    messages: HashMap<RoomId, Vec<Message>>,
}

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    store: Mutex<Store>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                rooms: HashMap::new(),
                messages: HashMap::new(),
            }),
        }
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_room(&self, name: RoomName, admin_id: UserId) -> Result<Room, RepositoryError> {
        let room = Room::new(
            RoomIdFactory::generate(),
            name,
            admin_id,
            Timestamp::new(get_unix_timestamp()),
        );
        let mut store = self.store.lock().await;
        store.rooms.insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn find_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let store = self.store.lock().await;
        store
            .rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn add_member(&self, room_id: &RoomId, user_id: UserId) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        let room = store
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.add_member(user_id)?;
        Ok(())
    }

    async fn check_access(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let store = self.store.lock().await;
        let room = store
            .rooms
            .get(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        Ok(room.is_member(user_id))
    }

    async fn rooms_for_user(&self, user_id: &UserId) -> Result<Vec<Room>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .rooms
            .values()
            .filter(|room| room.is_member(user_id))
            .cloned()
            .collect())
    }

    async fn save_message(&self, message: &Message) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        if !store.rooms.contains_key(&message.room_id) {
            return Err(RepositoryError::RoomNotFound(
                message.room_id.as_str().to_string(),
            ));
        }
        store
            .messages
            .entry(message.room_id.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn load_messages(&self, room_id: &RoomId) -> Result<Vec<Message>, RepositoryError> {
        let store = self.store.lock().await;
        let mut messages = store.messages.get(room_id).cloned().unwrap_or_default();
        // 履歴 API は新しい順で返す
        messages.reverse();
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, MessageIdFactory};

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn room_name(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    async fn repo_with_room() -> (InMemoryChatRepository, Room) {
        let repo = InMemoryChatRepository::new();
        let room = repo
            .create_room(room_name("general"), user("alice"))
            .await
            .unwrap();
        (repo, room)
    }

    fn message_in(room: &Room, sender: &str, content: &str, at: i64) -> Message {
        Message::new(
            MessageIdFactory::generate(),
            user(sender),
            room.id.clone(),
            MessageContent::new(content.to_string()).unwrap(),
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_create_room_and_find_room() {
        // テスト項目: 作成したルームを ID で取得できる
        // given (前提条件):
        let (repo, room) = repo_with_room().await;

        // when (操作):
        let found = repo.find_room(&room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found.id, room.id);
        assert_eq!(found.name.as_str(), "general");
        assert_eq!(found.admin_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_find_room_not_found() {
        // テスト項目: 存在しないルームは RoomNotFound になる
        // given (前提条件):
        let repo = InMemoryChatRepository::new();
        let unknown = RoomIdFactory::generate();

        // when (操作):
        let result = repo.find_room(&unknown).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::RoomNotFound(_))));
    }

    #[tokio::test]
    async fn test_add_member_and_check_access() {
        // テスト項目: メンバー追加後にアクセス権が認められる
        // given (前提条件):
        let (repo, room) = repo_with_room().await;
        assert!(!repo.check_access(&room.id, &user("bob")).await.unwrap());

        // when (操作):
        repo.add_member(&room.id, user("bob")).await.unwrap();

        // then (期待する結果):
        assert!(repo.check_access(&room.id, &user("bob")).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_member_duplicate_fails() {
        // テスト項目: 既存メンバーの再追加は Room ドメインエラーになる
        // given (前提条件):
        let (repo, room) = repo_with_room().await;

        // when (操作):
        let result = repo.add_member(&room.id, user("alice")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::Room(_))));
    }

    #[tokio::test]
    async fn test_rooms_for_user() {
        // テスト項目: ユーザーが所属するルームだけが返される
        // given (前提条件):
        let repo = InMemoryChatRepository::new();
        let general = repo
            .create_room(room_name("general"), user("alice"))
            .await
            .unwrap();
        repo.create_room(room_name("private"), user("bob"))
            .await
            .unwrap();

        // when (操作):
        let rooms = repo.rooms_for_user(&user("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, general.id);
    }

    #[tokio::test]
    async fn test_save_message_requires_existing_room() {
        // テスト項目: 存在しないルームへのメッセージ保存は失敗する
        // given (前提条件):
        let repo = InMemoryChatRepository::new();
        let ghost_room = Room::new(
            RoomIdFactory::generate(),
            room_name("ghost"),
            user("alice"),
            Timestamp::new(0),
        );
        let message = message_in(&ghost_room, "alice", "hello?", 1);

        // when (操作):
        let result = repo.save_message(&message).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::RoomNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_messages_newest_first() {
        // テスト項目: 履歴は新しい順で返される
        // given (前提条件):
        let (repo, room) = repo_with_room().await;
        repo.save_message(&message_in(&room, "alice", "first", 1))
            .await
            .unwrap();
        repo.save_message(&message_in(&room, "alice", "second", 2))
            .await
            .unwrap();

        // when (操作):
        let messages = repo.load_messages(&room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content.as_str(), "second");
        assert_eq!(messages[1].content.as_str(), "first");
    }

    #[tokio::test]
    async fn test_load_messages_empty_room() {
        // テスト項目: メッセージのないルームの履歴は空
        // given (前提条件):
        let (repo, room) = repo_with_room().await;

        // when (操作):
        let messages = repo.load_messages(&room.id).await.unwrap();

        // then (期待する結果):
        assert!(messages.is_empty());
    }
}
