//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - サーバー側でのメッセージ組み立てとブローカーへの発行
//!
//! ### なぜこのテストが必要か
//! - 送信者・ルームはサーバー側で刻印し、クライアント入力を信用しない
//! - 発行失敗は「配送保証なし」として呼び出し側へ伝わる必要がある
//! - 不正な内容はブローカーに到達する前に弾く
//!
//! ### どのような状況を想定しているか
//! - 正常系: メッセージの組み立てと発行
//! - 異常系: 空の内容、発行失敗

use std::sync::Arc;

use hiroma_shared::time::get_unix_timestamp;

use crate::domain::{
    Message, MessageBroker, MessageContent, MessageIdFactory, RoomId, Timestamp, UserId,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessageBroker（耐久キューの抽象化）
    broker: Arc<dyn MessageBroker>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(broker: Arc<dyn MessageBroker>) -> Self {
        Self { broker }
    }

    /// メッセージ送信を実行
    ///
    /// クライアントから信用するのは内容のみ。ID・送信者・ルーム・時刻は
    /// ここで刻印し、組み立てたメッセージを耐久キューへ発行する。
    /// 配送（永続化とファンアウト）はブローカーのコンシューマ側で行われる。
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 発行されたメッセージ（刻印済み）
    /// * `Err(SendMessageError)` - バリデーションまたは発行の失敗
    pub async fn execute(
        &self,
        sender_id: UserId,
        room_id: RoomId,
        content: String,
    ) -> Result<Message, SendMessageError> {
        let content = MessageContent::new(content)?;
        let message = Message::new(
            MessageIdFactory::generate(),
            sender_id,
            room_id,
            content,
            Timestamp::new(get_unix_timestamp()),
        );

        self.broker.publish(&message).await?;
        Ok(message)
    }
}
