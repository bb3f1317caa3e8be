//! Display Formatting
//!
//! Amounts, percentages, category labels and relative times.

use chrono::{Local, NaiveDateTime};

use crate::models::parse_timestamp;

/// English category keys and their display names
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("Child Welfare", "아동복지"),
    ("Elder Care", "노인복지"),
    ("Disability Support", "장애인복지"),
    ("Animal Protection", "동물보호"),
    ("Environment", "환경보호"),
    ("Education", "교육"),
    ("Others", "기타"),
];

/// Insert thousands separators: `1234567` -> `1,234,567`
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1,234,567원`
pub fn format_won(amount: i64) -> String {
    format!("{}원", format_amount(amount))
}

/// Achievement rate, capped at 100
pub fn calculate_percentage(current: i64, target: i64) -> u32 {
    if target == 0 {
        return 0;
    }
    let rate = (current as f64 / target as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u32
}

/// Korean label for a category key; unknown keys pass through
pub fn category_label(category: &str) -> &str {
    CATEGORY_LABELS
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, label)| *label)
        .unwrap_or(category)
}

/// Category keys in display order, for select boxes
pub fn category_options() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATEGORY_LABELS.iter().copied()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Relative time for recent events, absolute date after a week
pub fn time_ago(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let secs = (now - timestamp).num_seconds().max(0);
    match secs {
        0..=59 => "방금 전".to_string(),
        60..=3_599 => format!("{}분 전", secs / 60),
        3_600..=86_399 => format!("{}시간 전", secs / 3_600),
        86_400..=604_799 => format!("{}일 전", secs / 86_400),
        _ => format_date(timestamp),
    }
}

/// `time_ago` for raw server strings; unparsable input is shown as-is
pub fn time_ago_str(raw: &str, now: NaiveDateTime) -> String {
    parse_timestamp(raw)
        .map(|ts| time_ago(ts, now))
        .unwrap_or_else(|| raw.to_string())
}

/// `2024년 3월 1일`
pub fn format_date(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y년 %-m월 %-d일").to_string()
}

/// Date part of a server timestamp (`2024-03-01T10:00:00` -> `2024-03-01`)
pub fn short_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Whole 24-hour periods between two instants
pub fn days_elapsed(timestamp: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - timestamp).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(1234567), "1,234,567");
        assert_eq!(format_amount(-50000), "-50,000");
        assert_eq!(format_won(30000), "30,000원");
    }

    #[test]
    fn test_calculate_percentage() {
        assert_eq!(calculate_percentage(500, 0), 0);
        assert_eq!(calculate_percentage(1_500_000, 3_000_000), 50);
        assert_eq!(calculate_percentage(2, 3), 67);
        assert_eq!(calculate_percentage(5_000_000, 3_000_000), 100);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("Education"), "교육");
        assert_eq!(category_label("Others"), "기타");
        assert_eq!(category_label("교육"), "교육");
        assert_eq!(category_options().count(), 7);
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = at(2024, 6, 10, 12, 0);
        assert_eq!(time_ago(now - Duration::seconds(30), now), "방금 전");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5분 전");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3시간 전");
        assert_eq!(time_ago(now - Duration::days(2), now), "2일 전");
        assert_eq!(time_ago(at(2024, 5, 1, 9, 0), now), "2024년 5월 1일");
        assert_eq!(time_ago(now + Duration::minutes(1), now), "방금 전");
    }

    #[test]
    fn test_time_ago_str_passthrough() {
        let now = at(2024, 6, 10, 12, 0);
        assert_eq!(time_ago_str("2024-06-10T11:00:00", now), "1시간 전");
        assert_eq!(time_ago_str("어제", now), "어제");
    }

    #[test]
    fn test_days_elapsed_whole_days() {
        let now = at(2024, 6, 10, 0, 30);
        assert_eq!(days_elapsed(at(2024, 6, 9, 23, 50), now), 0);
        assert_eq!(days_elapsed(at(2024, 6, 9, 0, 29), now), 1);
        assert_eq!(days_elapsed(at(2024, 6, 2, 0, 30), now), 8);
        assert_eq!(short_date("2024-06-10T11:00:00"), "2024-06-10");
    }
}
