//! UI 層
//!
//! axum ベースの接続ゲートウェイ（WebSocket）とルーム管理 HTTP API。

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use state::AppState;
