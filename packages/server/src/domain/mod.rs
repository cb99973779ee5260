//! Domain 層
//!
//! チャットバックエンドのドメインモデル（エンティティ・値オブジェクト）と、
//! 外部コラボレータへのインターフェース（Repository / IdentityResolver /
//! MessageBroker / ClientConnection）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod auth;
pub mod broker;
pub mod connection;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use auth::IdentityResolver;
pub use broker::MessageBroker;
pub use connection::ClientConnection;
pub use entity::{Message, Room};
pub use error::{
    AuthError, BrokerError, ConnectionError, RepositoryError, RoomError, ValueObjectError,
};
pub use factory::{MessageIdFactory, RoomIdFactory};
pub use repository::ChatRepository;
pub use value_object::{MessageContent, MessageId, RoomId, RoomName, Timestamp, UserId};
