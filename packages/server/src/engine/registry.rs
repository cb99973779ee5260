//! Room Registry: アクティブなルームエンジンのディレクトリ
//!
//! ## 責務
//!
//! - `ルーム ID → RoomEngine` の並行安全なディレクトリ管理
//! - エンジンの遅延生成（最初のアクセス時）と破棄（空になったとき）
//!
//! エンジンの生成・削除を行えるのはこの Registry だけ。ディレクトリロックは
//! 検索・挿入・削除の間だけ保持し、ブロックしうる呼び出しをまたいで
//! 保持しない。各ルームの参加者マップはエンジン自身のロックが守るため、
//! ルーム同士が競合することはない。

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::domain::{ChatRepository, RoomId};

use super::room::{EngineConfig, RoomEngine};

/// Concurrency-safe directory of active room engines.
pub struct RoomRegistry {
    repository: Arc<dyn ChatRepository>,
    config: EngineConfig,
    engines: Mutex<HashMap<RoomId, Arc<RoomEngine>>>,
}

impl RoomRegistry {
    /// Create a registry with production engine defaults.
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self::with_config(repository, EngineConfig::default())
    }

    /// Create a registry whose engines use explicit tuning.
    pub fn with_config(repository: Arc<dyn ChatRepository>, config: EngineConfig) -> Self {
        Self {
            repository,
            config,
            engines: Mutex::new(HashMap::new()),
        }
    }

    /// Return the active engine for a room, creating and starting one if
    /// absent.
    ///
    /// Atomic per room id: when two callers race, the engine that loses the
    /// insert is stopped again and the winner is returned, so there are
    /// never two engines for the same room. The directory lock is not held
    /// across engine startup.
    pub async fn get_or_create(&self, room_id: &RoomId) -> Arc<RoomEngine> {
        if let Some(engine) = self.engines.lock().await.get(room_id) {
            return Arc::clone(engine);
        }

        let engine = RoomEngine::with_config(
            room_id.clone(),
            Arc::clone(&self.repository),
            self.config.clone(),
        );
        engine.start().await;

        let loser = {
            let mut engines = self.engines.lock().await;
            match engines.get(room_id) {
                Some(existing) => {
                    let winner = Arc::clone(existing);
                    Some((winner, Arc::clone(&engine)))
                }
                None => {
                    engines.insert(room_id.clone(), Arc::clone(&engine));
                    tracing::info!(room = %room_id, "room engine activated");
                    None
                }
            }
        };

        match loser {
            Some((winner, loser)) => {
                loser.stop().await;
                winner
            }
            None => engine,
        }
    }

    /// Return the active engine for a room, if any.
    pub async fn get(&self, room_id: &RoomId) -> Option<Arc<RoomEngine>> {
        self.engines.lock().await.get(room_id).map(Arc::clone)
    }

    /// Whether a room currently has an active engine.
    pub async fn is_active(&self, room_id: &RoomId) -> bool {
        self.engines.lock().await.contains_key(room_id)
    }

    /// Remove an engine from the directory.
    ///
    /// Removes only when the directory still holds the *same* instance, so
    /// a teardown racing with re-activation can never clobber a freshly
    /// created successor. Returns whether the removal happened; the caller
    /// stops the engine afterwards.
    pub async fn remove(&self, room_id: &RoomId, engine: &Arc<RoomEngine>) -> bool {
        let mut engines = self.engines.lock().await;
        if engines
            .get(room_id)
            .is_some_and(|current| Arc::ptr_eq(current, engine))
        {
            engines.remove(room_id);
            tracing::info!(room = %room_id, "room engine deactivated");
            true
        } else {
            false
        }
    }

    /// Stop every active engine. Used on process shutdown.
    pub async fn shutdown(&self) {
        let drained: Vec<Arc<RoomEngine>> = {
            let mut engines = self.engines.lock().await;
            engines.drain().map(|(_, engine)| engine).collect()
        };
        for engine in drained {
            engine.stop().await;
        }
    }
}
