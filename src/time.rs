use std::time::SystemTime;
use chrono::{DateTime, Utc};

pub type ServerTime = DateTime<Utc>;

pub fn get_server_time_now() -> ServerTime {
    ServerTime::from(SystemTime::now())
}

/// Converts a chrono duration to a std duration. Negative durations become zero.
pub(crate) fn to_std_duration(duration: chrono::Duration) -> std::time::Duration {
    duration.to_std().unwrap_or(std::time::Duration::ZERO)
}
