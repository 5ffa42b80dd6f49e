//! Display helpers for amounts and timestamps.

use chrono::{DateTime, Utc};

/// Formats `value` en-US style: comma grouping, 2 to 4 fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.4}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac}")
}

/// Describes how long ago `then` was, relative to `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else {
        format!("{} days ago", seconds / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1.00");
        assert_eq!(format_number(8350.0), "8,350.00");
        assert_eq!(format_number(59.0), "59.00");
        assert_eq!(format_number(0.012), "0.012");
        assert_eq!(format_number(1234567.891), "1,234,567.891");
        assert_eq!(format_number(0.123456), "0.1235");
        assert_eq!(format_number(100.5), "100.50");
        assert_eq!(format_number(-1234.5), "-1,234.50");
        assert_eq!(format_number(0.0), "0.00");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(5), now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
        // Clock skew renders as recent.
        assert_eq!(time_ago(now + Duration::minutes(1), now), "Just now");
    }
}
