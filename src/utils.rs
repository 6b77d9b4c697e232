use chrono::{SecondsFormat, Utc};

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// ISO-8601 timestamp carried in every response envelope.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
