//! Common display utilities and helpers

/// Placeholder shown for missing values
pub const EMPTY: &str = "—";

/// Text of an optional value, or the placeholder
pub fn or_empty(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY).to_string()
}

/// Date part of an RFC 3339 timestamp, or the input unchanged
pub fn date_only(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
