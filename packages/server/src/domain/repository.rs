//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Message, Room},
    error::RepositoryError,
    value_object::{RoomId, RoomName, UserId},
};

/// Chat Repository trait
///
/// 永続化コラボレータへのインターフェース。ファンアウトのコア
/// （Room Engine）が必要とするのは `save_message` / `load_messages` のみで、
/// 残りの操作は HTTP サーフェス（ルーム作成・メンバー追加・履歴取得）を支える。
///
/// ## 依存性の逆転（DIP）
///
/// - ドメイン層が必要とするインターフェースをドメイン層自身が定義
/// - Infrastructure 層がドメイン層のインターフェースに依存
/// - ドメイン層は Infrastructure 層に依存しない
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// ルームを作成（作成者が管理者・最初のメンバーになる）
    async fn create_room(&self, name: RoomName, admin_id: UserId) -> Result<Room, RepositoryError>;

    /// ルームを取得
    async fn find_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// ルームにメンバーを追加
    async fn add_member(&self, room_id: &RoomId, user_id: UserId) -> Result<(), RepositoryError>;

    /// ユーザーがルームのメンバーかどうかを確認
    async fn check_access(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError>;

    /// ユーザーが所属するルームの一覧を取得
    async fn rooms_for_user(&self, user_id: &UserId) -> Result<Vec<Room>, RepositoryError>;

    /// メッセージを保存（ファンアウト前に必ず成功していること）
    async fn save_message(&self, message: &Message) -> Result<(), RepositoryError>;

    /// ルームのメッセージ履歴を取得（新しい順）
    async fn load_messages(&self, room_id: &RoomId) -> Result<Vec<Message>, RepositoryError>;
}
