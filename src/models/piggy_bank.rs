use serde::{Deserialize, Serialize};

use super::{de_amount, de_opt_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PiggyBankStatus {
    #[default]
    #[serde(rename = "ACTIVE", alias = "active")]
    Active,
    #[serde(rename = "LOCKED", alias = "locked")]
    Locked,
    #[serde(rename = "CLOSED", alias = "withdrawn", alias = "WITHDRAWN")]
    Withdrawn,
    #[serde(rename = "PENDING_SETTLEMENT", alias = "pending_settlement")]
    PendingSettlement,
}

impl PiggyBankStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PiggyBankStatus::Active => "모금중",
            PiggyBankStatus::Locked => "잠김",
            PiggyBankStatus::Withdrawn => "인출완료",
            PiggyBankStatus::PendingSettlement => "정산대기",
        }
    }
}

/// Undisbursed balance held for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiggyBank {
    pub piggy_bank_id: u64,
    pub project_id: u64,
    pub project_title: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_amount: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub withdrawn_amount: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub balance: i64,
    #[serde(default)]
    pub status: PiggyBankStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub target_amount: Option<i64>,
    #[serde(default)]
    pub achievement_rate: Option<f64>,
    #[serde(default)]
    pub donor_count: Option<u64>,
    #[serde(default)]
    pub recent_donations: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[serde(alias = "DEPOSIT")]
    Deposit,
    #[serde(alias = "WITHDRAWAL")]
    Withdrawal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    #[serde(default)]
    pub donor: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub settlement_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_aliases() {
        let closed: PiggyBankStatus = serde_json::from_str(r#""withdrawn""#).unwrap();
        let pending: PiggyBankStatus = serde_json::from_str(r#""PENDING_SETTLEMENT""#).unwrap();
        assert_eq!(closed, PiggyBankStatus::Withdrawn);
        assert_eq!(pending, PiggyBankStatus::PendingSettlement);
    }

    #[test]
    fn test_transaction_type_field() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id":1,"type":"deposit","amount":50000,"donor":"김**","timestamp":"2024-05-01T09:00:00"}"#)
                .unwrap();
        assert_eq!(tx.kind, TransactionType::Deposit);
        assert_eq!(tx.donor.as_deref(), Some("김**"));
    }
}
