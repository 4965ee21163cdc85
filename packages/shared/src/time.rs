use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as an RFC 3339 string in UTC.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_utc_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_utc_rfc3339() {
        // テスト項目: ミリ秒のタイムスタンプを RFC 3339 (UTC) 文字列に変換できる
        // given (前提条件):
        let millis = 1_672_498_800_123;

        // when (操作):
        let formatted = timestamp_to_utc_rfc3339(millis);

        // then (期待する結果):
        assert_eq!(formatted, "2022-12-31T15:00:00.123Z");
    }

    #[test]
    fn test_get_utc_timestamp_is_monotonic_enough() {
        // テスト項目: 連続して取得したタイムスタンプが逆行しない
        let first = get_utc_timestamp();
        let second = get_utc_timestamp();
        assert!(second >= first);
    }
}
