//! HTTP を使った IdentityResolver 実装
//!
//! 認証サービスの `GET /api/auth/me` に Bearer トークンを渡し、
//! 解決されたユーザー ID を受け取ります。トークンの発行・更新・失効は
//! すべて認証サービス側の責務です。

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{AuthError, IdentityResolver, UserId};

/// 認証サービスからの応答
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    user_id: String,
}

/// 外部認証サービスへの HTTP クライアント
pub struct HttpIdentityResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityResolver {
    /// 新しい HttpIdentityResolver を作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - 認証サービスのベース URL（例: `http://localhost:8081`）
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn resolve(&self, credential: &str) -> Result<UserId, AuthError> {
        let response = self
            .client
            .get(format!("{}/api/auth/me", self.base_url))
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Unauthenticated);
        }

        let identity: IdentityResponse = response
            .json()
            .await
            .map_err(|err| AuthError::MalformedResponse(err.to_string()))?;

        UserId::new(identity.user_id).map_err(|err| AuthError::MalformedResponse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_response_deserialization() {
        // テスト項目: 認証サービスの応答形式をデコードできる
        // given (前提条件):
        let body = r#"{"user_id":"7b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d"}"#;

        // when (操作):
        let identity: IdentityResponse = serde_json::from_str(body).unwrap();

        // then (期待する結果):
        assert_eq!(identity.user_id, "7b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d");
    }
}
