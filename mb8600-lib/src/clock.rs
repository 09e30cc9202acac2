//! Millisecond timestamp source used when signing requests.

/// Returns milliseconds since the Unix epoch.
pub type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Clock backed by the system time
pub fn system_clock() -> Clock {
    Box::new(|| chrono::Utc::now().timestamp_millis())
}

/// Clock that always reports `millis`
pub fn fixed_clock(millis: i64) -> Clock {
    Box::new(move || millis)
}
