//! ClientConnection trait 定義
//!
//! 1 本のライブな双方向ストリーミング接続（の送信側）を抽象化します。
//! 実装は内部にハンドルローカルのロックを持ち、通常配送の書き込みと
//! 強制エビクションのクローズが競合しないことを保証します。

use async_trait::async_trait;

use super::error::ConnectionError;

/// 参加者 1 人分の送信側接続ハンドル
///
/// Room Engine のワーカーはこのインターフェース越しにのみ書き込む。
/// 同一の `(room, participant)` ペアに登録できるハンドルは常に 1 つで、
/// 再登録時は古いハンドルが `close` される（evict-and-replace）。
#[async_trait]
pub trait ClientConnection: Send + Sync {
    /// Write one text frame to the peer.
    async fn send_text(&self, payload: &str) -> Result<(), ConnectionError>;

    /// Close the connection. Idempotent; errors are swallowed because the
    /// peer may already be gone.
    async fn close(&self);
}
