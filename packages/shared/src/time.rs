//! Server clock helpers.
//!
//! All server-stamped times use China Standard Time (UTC+8).

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

const CST_OFFSET_SECS: i32 = 8 * 3600;

fn cst() -> FixedOffset {
    FixedOffset::east_opt(CST_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// Get current Unix timestamp (milliseconds).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_cst(timestamp_millis: i64) -> DateTime<FixedOffset> {
    let offset = cst();
    offset
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_else(|| Utc::now().with_timezone(&offset))
}

/// Format a Unix timestamp (milliseconds) as a wall-clock time, e.g. `14:03:59`.
pub fn format_clock(timestamp_millis: i64) -> String {
    to_cst(timestamp_millis).format("%H:%M:%S").to_string()
}

/// Format a Unix timestamp (milliseconds) as RFC 3339 in UTC+8.
pub fn timestamp_to_cst_rfc3339(timestamp_millis: i64) -> String {
    to_cst(timestamp_millis).to_rfc3339()
}
