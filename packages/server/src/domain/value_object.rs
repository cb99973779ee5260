//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Room identifier value object.
///
/// Rooms are created server-side, so the identifier is constrained to the
/// UUID format produced by `RoomIdFactory`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a RoomId from a string, validating the UUID format.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if uuid::Uuid::parse_str(&id).is_err() {
            return Err(ValueObjectError::RoomIdInvalidFormat(id));
        }
        Ok(Self(id))
    }

    /// Create a RoomId from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Create a MessageId from a string, validating the UUID format.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if uuid::Uuid::parse_str(&id).is_err() {
            return Err(ValueObjectError::MessageIdInvalidFormat(id));
        }
        Ok(Self(id))
    }

    /// Create a MessageId from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier value object.
///
/// User identities are issued by the external auth service; the format is
/// not constrained here beyond basic sanity limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::UserIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room display name value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.len();
        if len > 100 {
            return Err(ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Represents the content of a chat message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = content.len();
        if len > 10000 {
            return Err(ValueObjectError::MessageContentTooLong {
                max: 10000,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_new_valid_uuid() {
        // テスト項目: UUID 形式の文字列から RoomId を作成できる
        // given (前提条件):
        let id = "2f4c9ae6-58c6-4e4a-9d3e-2a4f2fd2a111".to_string();

        // when (操作):
        let result = RoomId::new(id.clone());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), id);
    }

    #[test]
    fn test_room_id_new_invalid_format_fails() {
        // テスト項目: UUID 形式でない文字列からは RoomId を作成できない
        // given (前提条件):
        let id = "not-a-uuid".to_string();

        // when (操作):
        let result = RoomId::new(id.clone());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomIdInvalidFormat(id));
    }

    #[test]
    fn test_room_id_from_uuid() {
        // テスト項目: UUID から RoomId を作成できる
        // given (前提条件):
        let uuid = uuid::Uuid::new_v4();

        // when (操作):
        let room_id = RoomId::from_uuid(uuid);

        // then (期待する結果):
        assert_eq!(room_id.as_str(), uuid.to_string());
    }

    #[test]
    fn test_user_id_new_success() {
        // テスト項目: 有効なユーザー ID を作成できる
        // given (前提条件):
        let id = "alice".to_string();

        // when (操作):
        let result = UserId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_user_id_new_empty_fails() {
        // テスト項目: 空のユーザー ID は作成できない
        // when (操作):
        let result = UserId::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UserIdEmpty);
    }

    #[test]
    fn test_user_id_new_too_long_fails() {
        // テスト項目: 101 文字以上のユーザー ID は作成できない
        // given (前提条件):
        let id = "a".repeat(101);

        // when (操作):
        let result = UserId::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UserIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_user_id_equality() {
        // テスト項目: 同じ値を持つ UserId は等価
        // given (前提条件):
        let id1 = UserId::new("alice".to_string()).unwrap();
        let id2 = UserId::new("alice".to_string()).unwrap();
        let id3 = UserId::new("bob".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_room_name_new_success() {
        // テスト項目: 有効なルーム名を作成できる
        // when (操作):
        let result = RoomName::new("general".to_string());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "general");
    }

    #[test]
    fn test_room_name_new_empty_fails() {
        // テスト項目: 空のルーム名は作成できない
        // when (操作):
        let result = RoomName::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_message_content_new_success() {
        // テスト項目: 有効なメッセージ内容を作成できる
        // when (操作):
        let result = MessageContent::new("Hello, world!".to_string());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Hello, world!");
    }

    #[test]
    fn test_message_content_new_empty_fails() {
        // テスト項目: 空のメッセージ内容は作成できない
        // when (操作):
        let result = MessageContent::new("".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageContentEmpty);
    }

    #[test]
    fn test_message_content_new_too_long_fails() {
        // テスト項目: 10001 文字以上のメッセージ内容は作成できない
        // given (前提条件):
        let content = "a".repeat(10001);

        // when (操作):
        let result = MessageContent::new(content);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageContentTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert_eq!(ts1.value(), 1000);
    }
}
