//! ワイヤ形式の DTO
//!
//! - `websocket`: クライアントから受け取るフレーム
//! - `http`: ルーム管理・履歴 API のリクエスト / レスポンス
//!
//! サーバーからクライアントへ送るチャットメッセージは、永続化済みの
//! ドメイン `Message` をそのままシリアライズしたもの（ブローカーの
//! ワイヤ形式と同一）。

pub mod http;
pub mod websocket;
