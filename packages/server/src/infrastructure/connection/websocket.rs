//! WebSocket を使った ClientConnection 実装
//!
//! ## 責務
//!
//! - axum の WebSocket 送信側（SplitSink）をハンドルローカルなロックで包む
//!
//! ひとつの接続に書き込めるタスクは常にひとつ。Room Engine のワーカーに
//! よる通常配送と、エビクション時の強制クローズは、どちらもこのロックを
//! 通るため競合しない。受信側（read loop）は UI 層が持つ。

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{SinkExt, stream::SplitSink};
use tokio::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ClientConnection, ConnectionError};

/// WebSocket 接続の送信側ハンドル
pub struct WsClientConnection {
    sink: Mutex<SplitSink<WebSocket, WsMessage>>,
}

impl WsClientConnection {
    /// 新しい WsClientConnection を作成
    pub fn new(sink: SplitSink<WebSocket, WsMessage>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }
}

#[async_trait]
impl ClientConnection for WsClientConnection {
    async fn send_text(&self, payload: &str) -> Result<(), ConnectionError> {
        let mut sink = self.sink.lock().await;
        sink.send(WsMessage::Text(payload.to_owned().into()))
            .await
            .map_err(|err| ConnectionError::WriteFailed(err.to_string()))
    }

    async fn close(&self) {
        let mut sink = self.sink.lock().await;
        // 相手がすでに居ない可能性があるのでエラーは握りつぶす
        let _ = sink.send(WsMessage::Close(None)).await;
        let _ = sink.close().await;
    }
}
