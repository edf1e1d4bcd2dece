//! Timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp in milliseconds as an RFC 3339 string (UTC).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_rfc3339() {
        // テスト項目: ミリ秒のタイムスタンプを RFC 3339 文字列に変換できる
        // given (前提条件):
        let millis = 1_672_498_800_000i64;

        // when (操作):
        let formatted = millis_to_rfc3339(millis);

        // then (期待する結果):
        assert_eq!(formatted, "2022-12-31T15:00:00.000Z");
    }

    #[test]
    fn test_now_millis_is_monotonic_enough() {
        // テスト項目: 連続して取得したタイムスタンプが逆行しない
        let first = now_millis();
        let second = now_millis();

        assert!(second >= first);
    }
}
