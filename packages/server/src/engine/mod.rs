//! Engine 層
//!
//! アクティブなルームごとのインメモリ・ランタイム。登録された参加者への
//! メッセージのファンアウト（ワーカープール + 有界キュー）と、その
//! ライフサイクル管理（Registry）を担います。永続化されるものは何もなく、
//! 最後の参加者が切断するとエンジンごと破棄されます。

pub mod registry;
pub mod room;

pub use registry::RoomRegistry;
pub use room::{EngineConfig, EngineError, EngineState, RoomEngine};
