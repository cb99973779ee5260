//! UseCase 層のエラー定義
//!
//! UI 層はここで定義されたエラーを HTTP ステータスへ写像します。

use thiserror::Error;

use crate::domain::{AuthError, BrokerError, RepositoryError, ValueObjectError};

/// 参加者接続時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 資格情報を解決できなかった（リトライしない）
    #[error("credential could not be resolved: {0}")]
    Unauthorized(AuthError),

    /// ルームが存在しない
    #[error("room not found")]
    RoomNotFound,

    /// ルームのメンバーではない
    #[error("user is not a member of the room")]
    AccessDenied,

    /// ルームエンジンへの登録が既定回数内に成立しなかった
    #[error("room engine unavailable")]
    RoomUnavailable,

    /// 永続化コラボレータの失敗
    #[error("room lookup failed: {0}")]
    Repository(RepositoryError),
}

/// メッセージ送信時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// メッセージ内容のバリデーション失敗
    #[error(transparent)]
    InvalidContent(#[from] ValueObjectError),

    /// ブローカーへの発行失敗（配送は保証されない）
    #[error("publish failed: {0}")]
    PublishFailed(#[from] BrokerError),
}

/// ルーム作成時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateRoomError {
    /// ルーム名のバリデーション失敗
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    /// 永続化コラボレータの失敗
    #[error("room creation failed: {0}")]
    Repository(RepositoryError),
}

/// メンバー追加時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddMemberError {
    /// ルームが存在しない
    #[error("room not found")]
    RoomNotFound,

    /// 管理者以外はメンバーを追加できない
    #[error("only the room administrator can add members")]
    NotAdmin,

    /// 追加対象のユーザー ID が不正
    #[error(transparent)]
    InvalidUserId(#[from] ValueObjectError),

    /// すでにメンバーである
    #[error("user '{0}' is already a member")]
    AlreadyMember(String),

    /// 永続化コラボレータの失敗
    #[error("member addition failed: {0}")]
    Repository(RepositoryError),
}

/// 履歴取得時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// ルームが存在しない
    #[error("room not found")]
    RoomNotFound,

    /// ルームのメンバーではない
    #[error("user is not a member of the room")]
    AccessDenied,

    /// 永続化コラボレータの失敗
    #[error("history load failed: {0}")]
    Repository(RepositoryError),
}
