//! MessageBroker trait 定義
//!
//! 耐久キューのプロデューサ側インターフェース。Gateway はクライアントから
//! 受け取ったメッセージをここへ渡すだけで、配送（ファンアウト）はブローカーの
//! コンシューマループが Room Engine 経由で行います。

use async_trait::async_trait;

use super::{entity::Message, error::BrokerError};

/// 耐久メッセージキューへの発行
///
/// `publish` がエラーを返した場合、そのメッセージの配送は保証されない。
/// 呼び出し側（Gateway）は該当クライアントの接続を閉じ、クライアントに
/// 再送・再接続させる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Publish a message to the durable queue with persistent delivery.
    async fn publish(&self, message: &Message) -> Result<(), BrokerError>;
}
