//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェースの具体的な実装
//! （RabbitMQ ブローカー、インメモリ Repository、HTTP 認証クライアント、
//! WebSocket 接続ハンドル）と、ワイヤ形式の DTO を提供します。

pub mod auth;
pub mod broker;
pub mod connection;
pub mod dto;
pub mod repository;
