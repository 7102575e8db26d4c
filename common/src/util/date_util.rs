use chrono::{DateTime, SecondsFormat, Utc};

/// 当前 UTC 时间（Unix 秒时间戳）
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Unix 秒时间戳 -> ISO-8601 (UTC)
pub fn time_to_iso(time: i64) -> String {
    DateTime::<Utc>::from_timestamp(time, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_iso() {
        assert_eq!(time_to_iso(0), "1970-01-01T00:00:00Z");
        assert_eq!(time_to_iso(1_700_000_000), "2023-11-14T22:13:20Z");
    }
}
