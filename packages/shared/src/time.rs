//! Time-related utilities with clock abstraction for testability.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Display format for wall-clock times shown in the chat pane
const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Manually advanced clock for testing timers and expirations
#[derive(Debug)]
pub struct ManualClock {
    current: AtomicI64,
}

impl ManualClock {
    /// Create a new manual clock starting at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            current: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock forward by `millis`
    pub fn advance(&self, millis: i64) {
        self.current.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.to_rfc3339(),
        None => DateTime::<Utc>::UNIX_EPOCH.to_rfc3339(),
    }
}

/// Convert Unix timestamp (milliseconds) to a local `HH:MM:SS` clock time
pub fn timestamp_to_local_clock(timestamp_millis: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.with_timezone(&Local).format(CLOCK_FORMAT).to_string(),
        None => "00:00:00".to_string(),
    }
}

/// Convert a stored timestamp string to a local `HH:MM:SS` clock time.
///
/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS` form (interpreted as UTC).
/// Returns `None` when the input matches neither.
pub fn stored_timestamp_to_local_clock(stored: &str) -> Option<String> {
    let utc = DateTime::parse_from_rfc3339(stored)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(stored, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
        })
        .ok()?;

    Some(utc.with_timezone(&Local).format(CLOCK_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // テスト項目: SystemClock が 0 以外のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp1 = clock.now_millis();
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert_eq!(timestamp1, fixed_time);
        assert_eq!(timestamp2, fixed_time);
    }

    #[test]
    fn test_manual_clock_advances() {
        // テスト項目: ManualClock が advance した分だけ進む
        // given (前提条件):
        let clock = ManualClock::new(1_000);

        // when (操作):
        clock.advance(2_500);

        // then (期待する結果):
        assert_eq!(clock.now_millis(), 3_500);
    }

    #[test]
    fn test_timestamp_to_rfc3339_format() {
        // テスト項目: タイムスタンプが正しく RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 UTC in milliseconds
        let timestamp = 1672531200000;

        // when (操作):
        let result = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.ends_with("+00:00"));
    }

    #[test]
    fn test_timestamp_to_local_clock_shape() {
        // テスト項目: ローカル時刻が HH:MM:SS 形式で返される
        // given (前提条件):
        let timestamp = 1672531200000;

        // when (操作):
        let result = timestamp_to_local_clock(timestamp);

        // then (期待する結果):
        assert_eq!(result.len(), 8);
        assert_eq!(result.matches(':').count(), 2);
    }

    #[test]
    fn test_stored_timestamp_accepts_both_formats() {
        // テスト項目: RFC 3339 と SQL 形式の両方を変換できる
        // given (前提条件):
        let rfc3339 = "2023-01-01T00:00:00+00:00";
        let sql = "2023-01-01 00:00:00";

        // when (操作):
        let from_rfc3339 = stored_timestamp_to_local_clock(rfc3339);
        let from_sql = stored_timestamp_to_local_clock(sql);

        // then (期待する結果): 同じ瞬間なので同じ表示になる
        assert!(from_rfc3339.is_some());
        assert_eq!(from_rfc3339, from_sql);
    }

    #[test]
    fn test_stored_timestamp_rejects_garbage() {
        // テスト項目: 解釈できない文字列は None になる
        // given (前提条件):
        let stored = "yesterday";

        // when (操作):
        let result = stored_timestamp_to_local_clock(stored);

        // then (期待する結果):
        assert!(result.is_none());
    }
}
