use chrono::{DateTime, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_unix_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in UTC
///
/// Timestamps that fall outside the representable range are rendered as
/// the Unix epoch rather than panicking.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    let datetime: DateTime<Utc> =
        DateTime::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    datetime.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unix_timestamp_is_positive() {
        // テスト項目: 現在時刻の Unix タイムスタンプが正の値で取得できる
        // when (操作):
        let timestamp = get_unix_timestamp();

        // then (期待する結果): 2020-01-01 以降であること
        assert!(timestamp > 1_577_836_800_000);
    }

    #[test]
    fn test_timestamp_to_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプを RFC 3339 文字列に変換できる
        // given (前提条件): 2023-01-01T00:00:00Z
        let timestamp = 1_672_531_200_000i64;

        // when (操作):
        let formatted = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert!(formatted.starts_with("2023-01-01T00:00:00"));
    }

    #[test]
    fn test_timestamp_to_rfc3339_out_of_range() {
        // テスト項目: 変換できない値はエポックにフォールバックする
        // when (操作):
        let formatted = timestamp_to_rfc3339(i64::MAX);

        // then (期待する結果):
        assert!(formatted.starts_with("1970-01-01T00:00:00"));
    }
}
