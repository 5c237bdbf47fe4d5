use chrono::{DateTime, Utc};

/// Tags string shown for images that carry no repository tag
pub const UNTAGGED: &str = "<none>:<none>";

/// Joins repository tags for display, falling back to [`UNTAGGED`]
pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        UNTAGGED.to_string()
    } else {
        tags.join(", ")
    }
}

/// Converts a byte count into a short decimal size such as `"1.23 MB"`
/// Keeps three significant digits: two decimals below 10, one below 100, none above
pub fn format_size(size: i64) -> String {
    let mut value = size as f64;
    let mut unit = "B";
    if value >= 1e9 {
        value /= 1e9;
        unit = "GB";
    } else if value >= 1e6 {
        value /= 1e6;
        unit = "MB";
    } else if value >= 1e3 {
        value /= 1e3;
        unit = "KB";
    }

    if value >= 99.95 {
        format!("{:.0} {}", value, unit)
    } else if value >= 9.995 {
        format!("{:.1} {}", value, unit)
    } else {
        format!("{:.2} {}", value, unit)
    }
}

/// Relative age of a unix timestamp, measured from now
pub fn format_age(created: i64) -> String {
    format_age_at(created, Utc::now())
}

/// Relative age of a unix timestamp, measured from `now`
pub fn format_age_at(created: i64, now: DateTime<Utc>) -> String {
    let seconds = now.timestamp().saturating_sub(created).max(0) as f64;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;

    if hours > 24.0 * 365.0 * 2.0 {
        return format!("{:.0} years ago", hours / (24.0 * 365.0));
    }
    if hours >= 24.0 * 61.0 {
        return format!("{:.0} months ago", hours / (24.0 * 61.0 / 2.0));
    }
    if hours >= 24.0 * 14.0 {
        return format!("{:.0} weeks ago", hours / (24.0 * 7.0));
    }
    if hours >= 24.0 * 2.0 {
        return format!("{:.0} days ago", hours / 24.0);
    }
    if hours >= 2.0 {
        return format!("{:.0} hours ago", hours);
    }
    if minutes >= 2.0 {
        return format!("{:.0} minutes ago", minutes);
    }
    if seconds >= 10.0 {
        return format!("{:.0} seconds ago", seconds);
    }
    "seconds ago".to_string()
}
