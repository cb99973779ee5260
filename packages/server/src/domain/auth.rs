//! IdentityResolver trait 定義
//!
//! 外部認証サービスへのインターフェース。トークンの発行・更新は
//! 認証サービス側の責務で、このバックエンドは「資格情報 → ユーザー ID」の
//! 解決だけを依存として持ちます。

use async_trait::async_trait;

use super::{error::AuthError, value_object::UserId};

/// 資格情報からユーザー ID を解決する
///
/// Gateway は接続登録の前に必ずこの呼び出しを行い、いかなるエラーも
/// 「未認証」として扱います（リトライしない）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a presented credential to the authenticated user's identity.
    async fn resolve(&self, credential: &str) -> Result<UserId, AuthError>;
}
