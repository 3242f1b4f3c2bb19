use chrono::Utc;

pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Expiry stamp for log-style records, unix seconds.
pub fn expiry_after_days(days: i64) -> i64 {
    unix_now() + days * 86_400
}
