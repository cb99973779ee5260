//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase の認証・認可・エンジン登録
//!
//! ### なぜこのテストが必要か
//! - 未認証・非メンバーの接続を確実に拒否する（Gateway の防衛線）
//! - Draining 中のエンジンに当たった接続が、新しいエンジンで
//!   やり直されることを保証する（teardown との競合窓）
//!
//! ### どのような状況を想定しているか
//! - 正常系: 認証 → メンバー確認 → エンジン登録
//! - 異常系: 資格情報の解決失敗、存在しないルーム、非メンバー
//! - エッジケース: Draining 中のエンジンへの登録リトライ

use std::{sync::Arc, time::Duration};

use crate::domain::{
    ChatRepository, ClientConnection, IdentityResolver, RepositoryError, RoomId, UserId,
};
use crate::engine::{EngineError, RoomEngine, RoomRegistry};

use super::error::ConnectError;

/// 1 接続あたりの登録リトライ上限
///
/// Draining 中のエンジンはディレクトリから外されるまでのごく短い間だけ
/// 残るため、少数回のリトライで必ず新しいエンジンに到達する。
const REGISTER_RETRY_LIMIT: usize = 16;

/// リトライ間の待ち時間
const REGISTER_RETRY_DELAY: Duration = Duration::from_millis(10);

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// IdentityResolver（認証コラボレータの抽象化）
    resolver: Arc<dyn IdentityResolver>,
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// アクティブなルームエンジンのディレクトリ
    registry: Arc<RoomRegistry>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        resolver: Arc<dyn IdentityResolver>,
        repository: Arc<dyn ChatRepository>,
        registry: Arc<RoomRegistry>,
    ) -> Self {
        Self {
            resolver,
            repository,
            registry,
        }
    }

    /// 資格情報からユーザー ID を解決する
    ///
    /// いかなる失敗も「未認証」として扱い、リトライしない。
    pub async fn authenticate(&self, credential: &str) -> Result<UserId, ConnectError> {
        self.resolver
            .resolve(credential)
            .await
            .map_err(ConnectError::Unauthorized)
    }

    /// ルームの存在とメンバーシップを確認する
    pub async fn authorize(&self, room_id: &RoomId, user_id: &UserId) -> Result<(), ConnectError> {
        let room = self
            .repository
            .find_room(room_id)
            .await
            .map_err(|err| match err {
                RepositoryError::RoomNotFound(_) => ConnectError::RoomNotFound,
                other => ConnectError::Repository(other),
            })?;
        if !room.is_member(user_id) {
            return Err(ConnectError::AccessDenied);
        }
        Ok(())
    }

    /// 接続をルームエンジンに登録する
    ///
    /// Draining 中のエンジンに当たった場合は、teardown がディレクトリから
    /// エンジンを外すのを待って `get_or_create` からやり直す。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        user_id: UserId,
        connection: Arc<dyn ClientConnection>,
    ) -> Result<Arc<RoomEngine>, ConnectError> {
        for _ in 0..REGISTER_RETRY_LIMIT {
            let engine = self.registry.get_or_create(room_id).await;
            match engine
                .register(user_id.clone(), Arc::clone(&connection))
                .await
            {
                Ok(()) => return Ok(engine),
                Err(EngineError::Stopping(_)) => {
                    tokio::time::sleep(REGISTER_RETRY_DELAY).await;
                }
            }
        }
        Err(ConnectError::RoomUnavailable)
    }
}
