use serde::{Deserialize, Serialize};

use super::{de_amount, de_opt_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "rejected")]
    Rejected,
}

impl SettlementStatus {
    pub const ALL: [SettlementStatus; 4] = [
        SettlementStatus::Pending,
        SettlementStatus::Approved,
        SettlementStatus::Completed,
        SettlementStatus::Rejected,
    ];

    /// Lower-case form used in list filters
    pub fn as_filter(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Approved => "approved",
            SettlementStatus::Completed => "completed",
            SettlementStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "검토중",
            SettlementStatus::Approved => "승인",
            SettlementStatus::Completed => "송금완료",
            SettlementStatus::Rejected => "반려",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementDocument {
    pub document_id: u64,
    pub file_name: String,
    pub file_url: String,
}

/// Withdrawal request against a piggy bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub settlement_id: u64,
    #[serde(default)]
    pub piggy_bank_id: u64,
    pub project_title: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    pub request_amount: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub fee: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub transfer_amount: i64,
    #[serde(default)]
    pub status: SettlementStatus,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub account_holder: String,
    #[serde(default)]
    pub requested_at: String,
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub documents: Vec<SettlementDocument>,
}

/// Organization-side settlement history row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementHistory {
    pub id: u64,
    #[serde(default)]
    pub piggy_bank_id: u64,
    pub project_title: String,
    #[serde(default)]
    pub request_date: String,
    #[serde(deserialize_with = "de_amount")]
    pub request_amount: i64,
    #[serde(default)]
    pub status: SettlementStatus,
    #[serde(default)]
    pub approved_date: Option<String>,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub transferred_amount: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub fee: Option<i64>,
    #[serde(default)]
    pub fee_rate: f64,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub account_holder: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSettlementRequest {
    pub piggy_bank_id: u64,
    pub request_amount: i64,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementFilters {
    pub status: Option<SettlementStatus>,
    pub keyword: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl SettlementFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("status", self.status.map(|s| s.as_filter().to_string())),
            ("keyword", self.keyword.clone()),
            ("page", Some(self.page.to_string())),
            ("size", Some(self.size.max(1).to_string())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub document_id: u64,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_both_cases() {
        let upper: SettlementStatus = serde_json::from_str(r#""APPROVED""#).unwrap();
        let lower: SettlementStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(upper, SettlementStatus::Approved);
        assert_eq!(lower, SettlementStatus::Rejected);
        assert_eq!(serde_json::to_string(&SettlementStatus::Completed).unwrap(), r#""COMPLETED""#);
    }

    #[test]
    fn test_filter_pairs_skip_all_status() {
        let filters = SettlementFilters { size: 20, ..Default::default() };
        assert!(filters.query_pairs().contains(&("status", None)));
    }
}
