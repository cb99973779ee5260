//! Room Engine: アクティブなルーム 1 つ分のファンアウト・ランタイム
//!
//! ## 責務
//!
//! - 接続中の参加者マップの管理（evict-and-replace 登録）
//! - メッセージの永続化とファンアウト（永続化が成功するまでファンアウトしない）
//! - 有界タスクキュー + 固定ワーカープールによる配送
//!   （遅い受信者 1 人が他の受信者への配送をブロックしない）
//!
//! ## バックプレッシャ方針
//!
//! キューが満杯のときは「新しいタスクを捨てる」（drop-new-on-full）。
//! 捨てたことはログとカウンタで観測可能にする。enqueue は決してブロックしない。
//!
//! ## ロック
//!
//! 参加者マップとライフサイクル状態は、このエンジン自身のロック配下にある
//! （Registry のディレクトリロックとは独立）。接続ハンドルの書き込みは
//! ハンドル自身のロックが守るので、ここでは保持しない。ロック保持中に
//! ネットワーク I/O は行わない（エビクションのクローズはロック解放後）。

use std::{
    collections::HashMap,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use thiserror::Error;
use tokio::{
    sync::{Mutex, mpsc, watch},
    task::JoinHandle,
};

use crate::domain::{ChatRepository, ClientConnection, Message, RepositoryError, RoomId, UserId};

/// Fixed number of delivery workers per active room.
pub const WORKER_COUNT: usize = 5;

/// Capacity of the bounded fan-out task queue.
pub const TASK_QUEUE_CAPACITY: usize = 256;

/// Deadline for a single write to a participant connection.
pub const WRITE_DEADLINE: Duration = Duration::from_secs(5);

/// Tuning knobs for a room engine.
///
/// Production always uses `EngineConfig::default()`; tests shrink the queue
/// and the deadline to exercise the backpressure and eviction paths.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub write_deadline: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: WORKER_COUNT,
            queue_capacity: TASK_QUEUE_CAPACITY,
            write_deadline: WRITE_DEADLINE,
        }
    }
}

/// Lifecycle state of a room engine.
///
/// `Draining` is entered when the last participant unregisters; the engine
/// refuses new registrations from then on, so the connect path can retry
/// against a fresh engine once the registry entry is gone. `Stopped` is
/// terminal; a later access to the room creates a brand-new engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Starting,
    Running,
    Draining,
    Stopped,
}

/// Errors surfaced by engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine no longer accepts registrations (draining or stopped)
    #[error("room engine for '{0}' is shutting down")]
    Stopping(String),
}

/// One unit of delivery work: a recipient handle plus the serialized message.
///
/// Immutable value; workers never reach back into the participant map to
/// perform a delivery.
struct FanoutTask {
    recipient: UserId,
    connection: Arc<dyn ClientConnection>,
    payload: String,
}

struct EngineInner {
    state: EngineState,
    participants: HashMap<UserId, Arc<dyn ClientConnection>>,
    /// Producer side of the task queue; `None` once the engine is stopped.
    queue_tx: Option<mpsc::Sender<FanoutTask>>,
}

/// In-memory runtime for one active room.
///
/// Created and owned exclusively by the `RoomRegistry`; destroyed after the
/// participant map becomes empty.
pub struct RoomEngine {
    room_id: RoomId,
    repository: Arc<dyn ChatRepository>,
    config: EngineConfig,
    inner: Mutex<EngineInner>,
    /// Consumer side of the task queue, handed to the worker pool on `start`.
    queue_rx: Mutex<Option<mpsc::Receiver<FanoutTask>>>,
    stop_tx: watch::Sender<bool>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    dropped_tasks: AtomicU64,
    /// ワーカーがエビクションで自分自身に戻ってくるための弱参照
    weak_self: Weak<RoomEngine>,
}

impl RoomEngine {
    /// Create an engine with production defaults. Workers are not running
    /// until `start` is called.
    pub fn new(room_id: RoomId, repository: Arc<dyn ChatRepository>) -> Arc<Self> {
        Self::with_config(room_id, repository, EngineConfig::default())
    }

    /// Create an engine with explicit tuning.
    pub fn with_config(
        room_id: RoomId,
        repository: Arc<dyn ChatRepository>,
        config: EngineConfig,
    ) -> Arc<Self> {
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity);
        let (stop_tx, _) = watch::channel(false);
        Arc::new_cyclic(|weak_self| Self {
            room_id,
            repository,
            config,
            inner: Mutex::new(EngineInner {
                state: EngineState::Starting,
                participants: HashMap::new(),
                queue_tx: Some(queue_tx),
            }),
            queue_rx: Mutex::new(Some(queue_rx)),
            stop_tx,
            workers: Mutex::new(Vec::new()),
            dropped_tasks: AtomicU64::new(0),
            weak_self: weak_self.clone(),
        })
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Spawn the fixed worker pool and transition to `Running`.
    ///
    /// Idempotent: a second call finds the queue receiver already taken and
    /// does nothing.
    pub async fn start(&self) {
        let Some(queue_rx) = self.queue_rx.lock().await.take() else {
            return;
        };
        let queue_rx = Arc::new(Mutex::new(queue_rx));

        let mut handles = Vec::with_capacity(self.config.worker_count);
        for worker_id in 0..self.config.worker_count {
            handles.push(tokio::spawn(run_worker(
                worker_id,
                self.room_id.clone(),
                self.weak_self.clone(),
                Arc::clone(&queue_rx),
                self.stop_tx.subscribe(),
                self.config.write_deadline,
            )));
        }
        self.workers.lock().await.extend(handles);
        self.inner.lock().await.state = EngineState::Running;
        tracing::debug!(room = %self.room_id, workers = self.config.worker_count, "room engine started");
    }

    pub async fn state(&self) -> EngineState {
        self.inner.lock().await.state
    }

    pub async fn participant_count(&self) -> usize {
        self.inner.lock().await.participants.len()
    }

    /// Number of fan-out tasks dropped by the backpressure policy so far.
    pub fn dropped_tasks(&self) -> u64 {
        self.dropped_tasks.load(Ordering::Relaxed)
    }

    /// Install a connection handle for a participant.
    ///
    /// Evict-and-replace: an existing handle for the same participant is
    /// removed from the map atomically with the insert and closed afterwards
    /// (the map never holds an evicted handle). Fails once the engine is
    /// draining so the caller can retry against a fresh engine.
    pub async fn register(
        &self,
        user_id: UserId,
        connection: Arc<dyn ClientConnection>,
    ) -> Result<(), EngineError> {
        let evicted = {
            let mut inner = self.inner.lock().await;
            if inner.state != EngineState::Running {
                return Err(EngineError::Stopping(self.room_id.as_str().to_string()));
            }
            inner.participants.insert(user_id.clone(), connection)
        };
        if let Some(old) = evicted {
            tracing::info!(room = %self.room_id, user = %user_id, "evicting previous connection for participant");
            old.close().await;
        }
        Ok(())
    }

    /// Remove a participant's handle and close it.
    ///
    /// Only removes the entry when it still holds the *same* handle; a stale
    /// connection's teardown must never kick a successor installed by
    /// re-registration. The engine transitions to `Draining` when the map
    /// becomes empty. Returns the number of participants still registered;
    /// the caller uses zero to trigger teardown via the registry.
    pub async fn unregister(
        &self,
        user_id: &UserId,
        connection: &Arc<dyn ClientConnection>,
    ) -> usize {
        let (removed, remaining) = {
            let mut inner = self.inner.lock().await;
            let same_handle = inner
                .participants
                .get(user_id)
                .is_some_and(|current| Arc::ptr_eq(current, connection));
            let removed = if same_handle {
                inner.participants.remove(user_id)
            } else {
                None
            };
            if inner.participants.is_empty() && inner.state == EngineState::Running {
                inner.state = EngineState::Draining;
            }
            (removed, inner.participants.len())
        };
        if let Some(connection) = removed {
            connection.close().await;
            tracing::debug!(room = %self.room_id, user = %user_id, "participant unregistered");
        }
        remaining
    }

    /// Persist a message, then fan it out to every registered participant.
    ///
    /// Persistence happens first; on error no fan-out task is enqueued and
    /// the error is returned so the broker consumer can nack-with-requeue.
    /// The participant snapshot is taken under the room lock and released
    /// before enqueuing; each enqueue is non-blocking and a full queue drops
    /// exactly that recipient's task (drop-new, observable via the counter).
    pub async fn deliver(&self, message: &Message) -> Result<(), RepositoryError> {
        self.repository.save_message(message).await?;

        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(err) => {
                // Message は常に直列化可能なはずだが、万一失敗しても
                // 永続化済みなのでブローカーへは成功として返す
                tracing::error!(room = %self.room_id, %err, "failed to serialize message for fan-out");
                return Ok(());
            }
        };

        let (targets, queue_tx) = {
            let inner = self.inner.lock().await;
            let targets: Vec<(UserId, Arc<dyn ClientConnection>)> = inner
                .participants
                .iter()
                .map(|(user_id, connection)| (user_id.clone(), Arc::clone(connection)))
                .collect();
            (targets, inner.queue_tx.clone())
        };

        let Some(queue_tx) = queue_tx else {
            // 停止済み: メッセージは永続化されているのでファンアウトのみ諦める
            self.dropped_tasks
                .fetch_add(targets.len() as u64, Ordering::Relaxed);
            return Ok(());
        };

        for (recipient, connection) in targets {
            let task = FanoutTask {
                recipient: recipient.clone(),
                connection,
                payload: payload.clone(),
            };
            if let Err(err) = queue_tx.try_send(task) {
                self.dropped_tasks.fetch_add(1, Ordering::Relaxed);
                let reason = match err {
                    mpsc::error::TrySendError::Full(_) => "queue full",
                    mpsc::error::TrySendError::Closed(_) => "queue closed",
                };
                tracing::warn!(
                    room = %self.room_id,
                    recipient = %recipient,
                    reason,
                    "dropping fan-out task"
                );
            }
        }
        Ok(())
    }

    /// Stop the engine: close the task queue, signal the workers, wait for
    /// all of them to finish, then close every remaining connection handle.
    ///
    /// Safe to call while late `deliver` calls are still arriving; their
    /// enqueues fail as counted drops. Idempotent.
    pub async fn stop(&self) {
        {
            let mut inner = self.inner.lock().await;
            if inner.state == EngineState::Stopped {
                return;
            }
            inner.state = EngineState::Stopped;
            // Sender を落とすとキューが閉じ、ワーカーは残タスクを処理後に抜ける
            inner.queue_tx = None;
        }
        let _ = self.stop_tx.send(true);

        let handles: Vec<JoinHandle<()>> = self.workers.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::error!(room = %self.room_id, %err, "fan-out worker terminated abnormally");
            }
        }

        let remaining: Vec<(UserId, Arc<dyn ClientConnection>)> =
            self.inner.lock().await.participants.drain().collect();
        for (user_id, connection) in remaining {
            tracing::debug!(room = %self.room_id, user = %user_id, "closing connection on engine stop");
            connection.close().await;
        }
        tracing::info!(
            room = %self.room_id,
            dropped_tasks = self.dropped_tasks(),
            "room engine stopped"
        );
    }
}

/// Delivery worker loop.
///
/// Pulls tasks until the queue closes or the stop signal fires. Each write
/// runs under the write deadline; a failed or timed-out write evicts exactly
/// that recipient and never touches the rest of the queue.
async fn run_worker(
    worker_id: usize,
    room_id: RoomId,
    engine: Weak<RoomEngine>,
    queue: Arc<Mutex<mpsc::Receiver<FanoutTask>>>,
    mut stop_rx: watch::Receiver<bool>,
    write_deadline: Duration,
) {
    loop {
        let task = {
            let mut queue = queue.lock().await;
            tokio::select! {
                task = queue.recv() => task,
                _ = stop_rx.changed() => None,
            }
        };
        let Some(task) = task else { break };

        let failed = match tokio::time::timeout(
            write_deadline,
            task.connection.send_text(&task.payload),
        )
        .await
        {
            Ok(Ok(())) => false,
            Ok(Err(err)) => {
                tracing::warn!(
                    room = %room_id,
                    recipient = %task.recipient,
                    %err,
                    "delivery write failed, evicting participant"
                );
                true
            }
            Err(_) => {
                tracing::warn!(
                    room = %room_id,
                    recipient = %task.recipient,
                    deadline_ms = write_deadline.as_millis() as u64,
                    "delivery write deadline exceeded, evicting participant"
                );
                true
            }
        };

        if failed && let Some(engine) = engine.upgrade() {
            engine.unregister(&task.recipient, &task.connection).await;
        }
    }
    tracing::debug!(room = %room_id, worker_id, "fan-out worker exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionError, MessageContent, MessageIdFactory, RoomIdFactory, Timestamp,
        repository::MockChatRepository,
    };
    use crate::infrastructure::repository::InMemoryChatRepository;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - RoomEngine の登録・エビクション・ファンアウト・停止の各動作
    //
    // 【なぜこのテストが必要か】
    // - このエンジンはシステムの中核で、接続リーク・メッセージ喪失・
    //   デッドロックが最も起きやすい場所
    // - 「永続化前にファンアウトしない」「満杯時は新規タスクのみ破棄」
    //   「遅い受信者が他をブロックしない」という不変条件を固定する
    //
    // 【どのようなシナリオをテストするか】
    // 1. 再登録で古いハンドルがエビクションされる
    // 2. 永続化失敗時はファンアウトされない
    // 3. キュー満杯時のバックプレッシャ（drop-new、既存タスクの順序保持）
    // 4. 書き込みデッドライン超過で該当参加者のみエビクション
    // 5. stop で全ハンドルがクローズされワーカーが合流する
    // 6. 最終参加者の切断後は Draining になり登録を拒否する
    // ========================================

    /// 書き込みを記録するテスト用の接続ハンドル
    struct TestConnection {
        sent: Mutex<Vec<String>>,
        closed: AtomicBool,
        /// true の場合、書き込みが永遠に完了しない（スタックした接続の模倣)
        stuck: bool,
    }

    impl TestConnection {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
                stuck: false,
            })
        }

        fn stuck() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
                stuck: true,
            })
        }

        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }

        async fn sent_count(&self) -> usize {
            self.sent.lock().await.len()
        }
    }

    #[async_trait]
    impl ClientConnection for TestConnection {
        async fn send_text(&self, payload: &str) -> Result<(), ConnectionError> {
            if self.stuck {
                std::future::pending::<()>().await;
            }
            if self.is_closed() {
                return Err(ConnectionError::Closed);
            }
            self.sent.lock().await.push(payload.to_string());
            Ok(())
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn test_message(room_id: &RoomId, sender: &str, content: &str) -> Message {
        Message::new(
            MessageIdFactory::generate(),
            user(sender),
            room_id.clone(),
            MessageContent::new(content.to_string()).unwrap(),
            Timestamp::new(hiroma_shared::time::get_unix_timestamp()),
        )
    }

    fn conn(handle: &Arc<TestConnection>) -> Arc<dyn ClientConnection> {
        Arc::clone(handle) as Arc<dyn ClientConnection>
    }

    #[tokio::test]
    async fn test_register_evicts_previous_handle() {
        // テスト項目: 同一参加者の再登録は古いハンドルを閉じて置き換える
        // given (前提条件):
        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::new(room_id, Arc::new(InMemoryChatRepository::new()));
        engine.start().await;

        let first = TestConnection::new();
        let second = TestConnection::new();
        engine.register(user("alice"), conn(&first)).await.unwrap();

        // when (操作):
        engine.register(user("alice"), conn(&second)).await.unwrap();

        // then (期待する結果): 古いハンドルのみ閉じられ、マップには 1 件だけ残る
        assert!(first.is_closed());
        assert!(!second.is_closed());
        assert_eq!(engine.participant_count().await, 1);

        engine.stop().await;
    }

    #[tokio::test]
    async fn test_deliver_persists_before_fanout() {
        // テスト項目: 配送されたメッセージは参加者に届き、かつ永続化されている
        // given (前提条件):
        let room_id = RoomIdFactory::generate();
        let repository = Arc::new(InMemoryChatRepository::new());
        let engine = RoomEngine::new(room_id.clone(), repository.clone());
        engine.start().await;

        let alice = TestConnection::new();
        let bob = TestConnection::new();
        engine.register(user("alice"), conn(&alice)).await.unwrap();
        engine.register(user("bob"), conn(&bob)).await.unwrap();

        // when (操作):
        let message = test_message(&room_id, "alice", "hi");
        engine.deliver(&message).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // then (期待する結果): 送信者含む全参加者に配送され、履歴にも保存されている
        assert_eq!(alice.sent_count().await, 1);
        assert_eq!(bob.sent_count().await, 1);
        let history = repository.load_messages(&room_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content.as_str(), "hi");

        engine.stop().await;
    }

    #[tokio::test]
    async fn test_deliver_persistence_failure_enqueues_nothing() {
        // テスト項目: 永続化が失敗した場合、ファンアウトタスクは 1 件も積まれない
        // given (前提条件):
        let mut repository = MockChatRepository::new();
        repository
            .expect_save_message()
            .returning(|_| Err(RepositoryError::Storage("db down".to_string())));

        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::new(room_id.clone(), Arc::new(repository));
        engine.start().await;

        let alice = TestConnection::new();
        engine.register(user("alice"), conn(&alice)).await.unwrap();

        // when (操作):
        let message = test_message(&room_id, "alice", "hi");
        let result = engine.deliver(&message).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        // then (期待する結果): エラーが返り、参加者には何も届かない
        assert!(result.is_err());
        assert_eq!(alice.sent_count().await, 0);
        assert_eq!(engine.dropped_tasks(), 0);

        engine.stop().await;
    }

    #[tokio::test]
    async fn test_full_queue_drops_only_new_task_and_preserves_order() {
        // テスト項目: キュー満杯時は新規タスクのみ破棄され、既存タスクは順序通り配送される
        // given (前提条件): 容量 2 のキュー、ワーカー未起動で 3 件配送
        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::with_config(
            room_id.clone(),
            Arc::new(InMemoryChatRepository::new()),
            EngineConfig {
                worker_count: 1,
                queue_capacity: 2,
                write_deadline: WRITE_DEADLINE,
            },
        );
        // start 前でも register/deliver は可能な状態にする
        {
            let mut inner = engine.inner.lock().await;
            inner.state = EngineState::Running;
        }

        let alice = TestConnection::new();
        engine.register(user("alice"), conn(&alice)).await.unwrap();

        // when (操作):
        for content in ["first", "second", "third"] {
            let message = test_message(&room_id, "alice", content);
            engine.deliver(&message).await.unwrap();
        }

        // then (期待する結果): 3 件目だけが破棄される
        assert_eq!(engine.dropped_tasks(), 1);

        // ワーカーを起動すると、積まれていた 2 件が順序通り届く
        engine.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        let sent = alice.sent.lock().await.clone();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("first"));
        assert!(sent[1].contains("second"));

        engine.stop().await;
    }

    #[tokio::test]
    async fn test_write_deadline_evicts_stuck_participant_only() {
        // テスト項目: 書き込みデッドライン超過で該当参加者のみエビクションされ、
        //             キュー内の他参加者向けタスクは配送される
        // given (前提条件): ワーカー 1、デッドライン 50ms
        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::with_config(
            room_id.clone(),
            Arc::new(InMemoryChatRepository::new()),
            EngineConfig {
                worker_count: 1,
                queue_capacity: 16,
                write_deadline: Duration::from_millis(50),
            },
        );
        engine.start().await;

        let stuck = TestConnection::stuck();
        let healthy = TestConnection::new();
        engine.register(user("stuck"), conn(&stuck)).await.unwrap();
        engine
            .register(user("healthy"), conn(&healthy))
            .await
            .unwrap();

        // when (操作):
        let message = test_message(&room_id, "healthy", "hello");
        engine.deliver(&message).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        // then (期待する結果):
        assert_eq!(healthy.sent_count().await, 1);
        assert!(stuck.is_closed());
        assert_eq!(engine.participant_count().await, 1);

        engine.stop().await;
    }

    #[tokio::test]
    async fn test_stop_closes_all_handles_and_joins_workers() {
        // テスト項目: stop で全参加者のハンドルが閉じられ、ワーカーが合流する
        // given (前提条件):
        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::new(room_id, Arc::new(InMemoryChatRepository::new()));
        engine.start().await;

        let conns: Vec<Arc<TestConnection>> =
            (0..3).map(|_| TestConnection::new()).collect();
        for (i, c) in conns.iter().enumerate() {
            engine
                .register(user(&format!("user-{i}")), conn(c))
                .await
                .unwrap();
        }

        // when (操作):
        engine.stop().await;

        // then (期待する結果):
        for c in &conns {
            assert!(c.is_closed());
        }
        assert_eq!(engine.participant_count().await, 0);
        assert_eq!(engine.state().await, EngineState::Stopped);
        assert!(engine.workers.lock().await.is_empty());

        // 冪等性: 二度目の stop も安全
        engine.stop().await;
    }

    #[tokio::test]
    async fn test_last_unregister_drains_engine_and_refuses_registration() {
        // テスト項目: 最終参加者の切断で Draining に遷移し、以後の登録は拒否される
        // given (前提条件):
        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::new(room_id, Arc::new(InMemoryChatRepository::new()));
        engine.start().await;

        let alice = TestConnection::new();
        let alice_conn = conn(&alice);
        engine
            .register(user("alice"), Arc::clone(&alice_conn))
            .await
            .unwrap();

        // when (操作):
        let remaining = engine.unregister(&user("alice"), &alice_conn).await;

        // then (期待する結果):
        assert_eq!(remaining, 0);
        assert!(alice.is_closed());
        assert_eq!(engine.state().await, EngineState::Draining);

        let late = TestConnection::new();
        let result = engine.register(user("bob"), conn(&late)).await;
        assert!(matches!(result, Err(EngineError::Stopping(_))));

        engine.stop().await;
    }

    #[tokio::test]
    async fn test_unregister_with_stale_handle_keeps_successor() {
        // テスト項目: 旧接続の後始末が、再登録済みの新しい接続を外さない
        // given (前提条件): alice が再接続済み（旧ハンドルはエビクション済み）
        let room_id = RoomIdFactory::generate();
        let engine = RoomEngine::new(room_id, Arc::new(InMemoryChatRepository::new()));
        engine.start().await;

        let old = TestConnection::new();
        let old_conn = conn(&old);
        let new = TestConnection::new();
        engine
            .register(user("alice"), Arc::clone(&old_conn))
            .await
            .unwrap();
        engine.register(user("alice"), conn(&new)).await.unwrap();

        // when (操作): 旧接続のハンドルで unregister
        let remaining = engine.unregister(&user("alice"), &old_conn).await;

        // then (期待する結果): 新しい接続は登録されたまま
        assert_eq!(remaining, 1);
        assert!(!new.is_closed());
        assert_eq!(engine.participant_count().await, 1);

        engine.stop().await;
    }
}
