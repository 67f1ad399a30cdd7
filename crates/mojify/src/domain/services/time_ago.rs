//! Relative timestamps for feed cards

use chrono::{DateTime, Utc};

/// Render `then` relative to `now`: "just now", "5m ago", "3h ago", "2d ago".
///
/// Timestamps in the future (clock skew) render as "just now".
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    if secs < 3_600 {
        return format!("{}m ago", secs / 60);
    }
    if secs < 86_400 {
        return format!("{}h ago", secs / 3_600);
    }
    format!("{}d ago", secs / 86_400)
}
