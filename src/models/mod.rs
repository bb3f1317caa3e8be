//! Frontend Models
//!
//! Data structures matching backend responses (camelCase JSON).

mod admin;
mod community;
mod donation;
mod notification;
mod piggy_bank;
mod project;
mod settlement;
mod user;

pub use admin::*;
pub use community::*;
pub use donation::*;
pub use notification::*;
pub use piggy_bank::*;
pub use project::*;
pub use settlement::*;
pub use user::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Spring-style page wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
}

impl<T> Default for PageResponse<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            size: 0,
        }
    }
}

impl<T> PageResponse<T> {
    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }
}

/// `{ success, data, message, errorCode }` envelope used by the auth, option,
/// favorite and project creation endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    pub error_code: Option<String>,
}

/// Won amounts arrive as integers or as BigDecimal-style floats (`10000.00`)
pub(crate) fn de_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.round() as i64).unwrap_or(0))
}

pub(crate) fn de_opt_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.round() as i64))
}

/// Timestamps come as ISO strings, with or without offset
pub fn parse_timestamp(raw: &str) -> Option<chrono::NaiveDateTime> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "de_amount", default)]
        a: i64,
        #[serde(deserialize_with = "de_opt_amount", default)]
        b: Option<i64>,
    }

    #[test]
    fn test_amount_accepts_decimal() {
        let parsed: Amounts = serde_json::from_str(r#"{"a": 10000.00, "b": 5}"#).unwrap();
        assert_eq!(parsed.a, 10000);
        assert_eq!(parsed.b, Some(5));

        let missing: Amounts = serde_json::from_str(r#"{"a": null}"#).unwrap();
        assert_eq!(missing.a, 0);
        assert_eq!(missing.b, None);
    }

    #[test]
    fn test_page_response_navigation() {
        let page: PageResponse<u32> =
            serde_json::from_str(r#"{"content":[1,2],"currentPage":0,"totalPages":3,"totalElements":25,"size":10}"#)
                .unwrap();
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-03-01T10:20:30").is_some());
        assert!(parse_timestamp("2024-03-01T10:20:30.123456").is_some());
        assert!(parse_timestamp("2024-03-01T10:20:30+09:00").is_some());
        assert!(parse_timestamp("2024-03-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
