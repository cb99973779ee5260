//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の登録解除と、最終参加者切断時のエンジン破棄
//!
//! ### なぜこのテストが必要か
//! - 接続・エンジンのリークを防ぐ（切断経路は必ず通る後始末）
//! - 最終参加者の切断でルームが非アクティブになることを保証
//! - 古い接続の後始末が再接続済みの参加者を巻き込まないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 参加者の切断（他の参加者が残る）
//! - エッジケース: 最後の参加者の切断（エンジン破棄）
//! - エッジケース: エビクション済みハンドルでの切断（後勝ちの接続は残る）

use std::sync::Arc;

use crate::domain::{ClientConnection, RoomId, UserId};
use crate::engine::RoomRegistry;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// アクティブなルームエンジンのディレクトリ
    registry: Arc<RoomRegistry>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者切断を実行
    ///
    /// read loop の終了経路から必ず一度呼ばれる。登録解除の結果、
    /// ルームに参加者が残っていなければ、Registry からエンジンを外した上で
    /// 停止する（remove はエンジン同一性を確認するので、再アクティブ化との
    /// 競合で新しいエンジンを壊すことはない）。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        connection: &Arc<dyn ClientConnection>,
    ) {
        let Some(engine) = self.registry.get(room_id).await else {
            return;
        };

        let remaining = engine.unregister(user_id, connection).await;
        if remaining == 0 && self.registry.remove(room_id, &engine).await {
            engine.stop().await;
        }
    }
}
